use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackError {
    #[error("route {0} is not supported")]
    UnsupportedRoute(u32),
}
