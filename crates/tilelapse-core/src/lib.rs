pub mod compose;
pub mod consts;
pub mod deliver;
pub mod encode;
pub mod error;
pub mod fetch;
pub mod io;
pub mod mosaic;
pub mod outcome;
pub mod pipeline;
pub mod source;
