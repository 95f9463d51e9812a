mod model_gateway;
mod pdf_text_source;

pub use model_gateway::{ModelGateway, ModelGatewayError, TokenStream};
pub use pdf_text_source::{PdfTextSource, PdfTextSourceError};
