pub mod memoized;
pub mod on_the_fly;

#[cfg(test)]
mod tests;
