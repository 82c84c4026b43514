pub mod cake;
pub mod pacer;
