pub mod animations;
pub mod downloads;
pub mod errors;
pub mod links;
pub mod performance;
pub mod resize;
pub mod smooth_scroll;
pub mod touch;

pub use animations::ScrollAnimations;
pub use downloads::DownloadTracking;
pub use errors::GlobalErrorLogging;
pub use links::LinkHardening;
pub use performance::PerformanceMonitor;
pub use resize::ResponsiveLayout;
pub use smooth_scroll::SmoothScroll;
pub use touch::TouchInteractions;
