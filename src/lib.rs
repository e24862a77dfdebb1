pub mod error;
pub mod logging;
pub mod paths;

pub mod commands {
    pub mod cp;
}
