pub mod dominant_color;
pub mod packet_mesh;
pub mod surface;
