pub mod highlights;
