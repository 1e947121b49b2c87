pub mod imagga;
pub mod staging;

#[cfg(test)]
pub mod mock_imagga;
