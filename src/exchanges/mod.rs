pub mod payeer;
