pub mod barber;
pub mod icon_gen;
pub mod png;
