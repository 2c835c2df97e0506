pub mod cheese;
