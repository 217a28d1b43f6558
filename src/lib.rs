pub mod drawing;
pub mod icon_gen;
