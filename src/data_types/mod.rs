pub mod axis;
pub mod candles;
pub mod data;
pub mod drawing;
pub mod options;
pub mod point;
pub mod state;

pub use axis::*;
pub use candles::*;
pub use data::*;
pub use drawing::*;
pub use options::*;
pub use point::*;
pub use state::*;
