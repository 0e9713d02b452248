pub mod lsblk;
pub mod lvm;
pub mod udev;
