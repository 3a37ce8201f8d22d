pub mod body;
pub mod fiducial;

pub use body::tab_body;
pub use fiducial::tab_fiducial;
