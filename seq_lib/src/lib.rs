pub mod pulse_sequence;
pub mod gradient_echo;
pub mod epi;
pub mod library;
