//! Generic field-of-view computation.
//!
//! ```
//! use fov::Fov;
//!
//! // Open field, nothing blocks sight.
//! let cells: Vec<[i32; 2]> = Fov::new(|_: [i32; 2]| false, 2, true).collect();
//! assert!(cells.contains(&[0, 0]));
//! assert!(cells.contains(&[2, 0]));
//! assert!(!cells.contains(&[2, 2]));
//! ```

mod fov;
pub use crate::fov::{Fov, Opacity};

mod quadrant;
