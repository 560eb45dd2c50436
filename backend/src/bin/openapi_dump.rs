//! Print the OpenAPI document for the store API.

use backend::ApiDoc;
use utoipa::OpenApi;

fn main() {
    let doc = ApiDoc::openapi()
        .to_pretty_json()
        .expect("serialize OpenAPI document");
    println!("{doc}");
}
