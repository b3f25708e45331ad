pub mod experience;
pub mod hotel;
pub mod intel;
pub mod itinerary;
pub mod place;
pub mod social;
pub mod weather;
