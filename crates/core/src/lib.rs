//! VentaFacil
//!
//! Cart engine for the VentaFacil point-of-sale and storefront. The crate is pure:
//! cart state, the reducer that mutates it, and the pricing helpers used to total and
//! display it. Persistence and the hosted backend live in `ventafacil-app`.

pub mod cart;
pub mod prelude;
pub mod pricing;
pub mod products;
