/// Render a boxed ASCII table. Headers are upper-cased; cells are left-aligned.
pub fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let border = {
        let mut s = String::from("+");
        for w in &widths {
            s.push_str(&"-".repeat(w + 2));
            s.push('+');
        }
        s.push('\n');
        s
    };

    let mut out = border.clone();
    out.push_str(&line(&widths, headers.iter().map(|h| h.to_uppercase())));
    out.push_str(&border);
    for row in rows {
        out.push_str(&line(&widths, row.iter().cloned()));
    }
    if !rows.is_empty() {
        out.push_str(&border);
    }
    out
}

fn line(widths: &[usize], mut cells: impl Iterator<Item = String>) -> String {
    let mut s = String::from("|");
    for w in widths {
        let cell = cells.next().unwrap_or_default();
        let pad = w - cell.chars().count().min(*w);
        s.push_str(&format!(" {}{} |", cell, " ".repeat(pad)));
    }
    s.push('\n');
    s
}
