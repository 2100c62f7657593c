pub mod datacenters;
pub mod gdelt;
pub mod hub;
pub mod opensky;
