pub mod nfdr;
