pub mod chat;
pub mod experiences;
pub mod health;
pub mod hotels;
pub mod img;
pub mod intel;
pub mod mindful;
pub mod social;
pub mod village;
pub mod weather;
pub mod yoga;
