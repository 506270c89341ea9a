//! Platform-independent core of the neuralfield backgrounds: the 2D particle
//! field, the 3D scene field and the clock, input and surface contracts they
//! share with the front ends.

pub mod activation;
pub mod camera;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod particles;
pub mod pulse;
pub mod scene;
pub mod surface;

pub use activation::*;
pub use camera::*;
pub use clock::*;
pub use config::*;
pub use error::*;
pub use input::*;
pub use particles::*;
pub use pulse::*;
pub use scene::*;
pub use surface::*;
