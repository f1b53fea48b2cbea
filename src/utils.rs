pub mod common;
pub mod compression;
pub mod crc16;
pub mod hash;
pub mod lzss;
pub mod macres;
pub mod punycode;
pub mod text;
pub mod wav;
