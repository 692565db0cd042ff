pub mod rover;
