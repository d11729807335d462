#![cfg_attr(docsrs, feature(doc_cfg))]

/*!
 # Product Import

 Validates, de-duplicates and imports product records from a delimited text
 file, with a dry-run mode that takes exactly the same decisions without
 persisting anything.

 ## Core Concepts

- **Job:** The whole import of one file. It loads the input, detects its
  encoding and delimiter, enforces the header contract and runs a `Step`.
  File-level problems (missing file, missing columns) fail the job.
- **Step:** Drives every data row through the reader, the processor and, in
  live mode, the writer, and counts imported and skipped rows.
- **ItemReader:** Splits the normalized text into raw rows.
- **ItemProcessor:** The business rule engine. Classifies each row as
  accepted, skipped (with a reason) or errored.
- **ItemWriter:** The record sink that persists accepted records.
- **DuplicateLookup:** Answers whether a product code is already known, from
  memory in a dry run or from the database in a live run.

 ## Rules

 A row is skipped, for the first rule it breaks, when:

 1. its field count differs from the header's,
 2. the name is longer than 50 characters,
 3. the description is longer than 255 characters,
 4. the code is longer than 10 characters,
 5. it costs less than £5 and has fewer than 10 in stock,
 6. it costs more than £1000,
 7. its code is already known.

 Rows where every field is blank are ignored without being counted.

 ## Features

| **Feature** | **Description**                                            |
|-------------|------------------------------------------------------------|
| sqlite      | SQLite record sink and duplicate lookup, and the CLI binary |
| full        | Enables all available features                             |

 ## Getting Started

```rust
# use product_import::{
#     core::job::{Job, JobBuilder},
#     error::ImportError,
# };
fn main() -> Result<(), ImportError> {
    let csv = "Product Code,Product Name,Product Description,Stock,Cost in GBP,Discontinued
P0001,TV,32 inch,10,399.99,no
P0002,Cd Player,Nice CD player,11,50.12,yes
P0002,Cd Player,Same code again,11,50.12,
P0003,Bad Cable,Too cheap to stock,2,1.50,";

    let job = JobBuilder::new()
        .bytes(csv.as_bytes().to_vec())
        .dry_run(true)
        .build()?;

    let report = job.run()?.report;

    assert_eq!(report.imported, 2);
    assert_eq!(report.skipped, 2);
    println!("{}", report);

    Ok(())
}
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.
 */

/// Core module for import operations
pub mod core;

/// Error types for import operations
pub mod error;

#[doc(inline)]
pub use error::*;

/// Set of readers, writers and lookups (for example: the csv reader and the sqlite writer)
pub mod item;

/// Product header contract, cleaners and business rules
pub mod product;
