pub mod nav;
pub mod state;
pub mod ui;

pub use nav::{NavItem, SubNav, TopView, ViewId};
pub use state::{Chart, ChartContext, ViewState};
pub use ui::{AppWrapper, GitVizApp};
