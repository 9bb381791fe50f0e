//! Sheet readers and writers, each behind its own cargo feature.

#[cfg_attr(docsrs, doc(cfg(feature = "io-xlsx")))]
#[cfg(feature = "io-xlsx")]
pub mod xlsx;

#[cfg_attr(docsrs, doc(cfg(feature = "io-csv")))]
#[cfg(feature = "io-csv")]
pub mod csv;

#[cfg_attr(docsrs, doc(cfg(feature = "io-jsonl")))]
#[cfg(feature = "io-jsonl")]
pub mod jsonl;
