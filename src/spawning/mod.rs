pub mod disc_spawning;
pub mod packet_spawning;
