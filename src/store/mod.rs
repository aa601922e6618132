mod traits;

#[cfg(test)]
pub use traits::MockStoreApi;
pub use traits::StoreApi;
