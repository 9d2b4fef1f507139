pub mod cozy;
