//! ofxlib — разбор выписок OFX (банковский счёт, кредитная карта) в типизированную модель

pub mod date;
pub mod error;
pub mod extract;
pub mod header;
pub mod mapping;
pub mod model;
pub mod normalize;
pub mod sections;
pub mod traits;

pub mod formats {
    pub mod ofx;
    pub mod sgml;
}
