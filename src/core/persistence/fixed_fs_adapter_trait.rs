use anyhow::Result;

/// CRUD surface of a single-document fs adapter.
pub trait FixedFsAdapterTrait<T> {
    fn new() -> Self
    where
        Self: Sized;

    fn read(&self) -> Result<T>;

    fn insert(&self, data: &T) -> Result<()>;

    fn update(&self, data: &T) -> Result<()>;

    fn delete(&self) -> Result<()>;
}
