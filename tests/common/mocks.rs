//! Mock versions of the record sink and the duplicate lookup.
use mockall::mock;

use product_import::{
    core::item::{DuplicateLookup, ItemWriter, ItemWriterResult, LookupResult},
    product::ProductRecord,
};

mock! {
    pub Writer {}
    impl ItemWriter<ProductRecord> for Writer {
        fn write(&self, items: &[ProductRecord]) -> ItemWriterResult;
        fn flush(&self) -> ItemWriterResult;
        fn open(&self) -> ItemWriterResult;
        fn close(&self) -> ItemWriterResult;
    }
}

mock! {
    pub Lookup {}
    impl DuplicateLookup for Lookup {
        fn exists(&self, code: &str) -> LookupResult<bool>;
        fn register(&self, code: &str) -> LookupResult<()>;
    }
}
