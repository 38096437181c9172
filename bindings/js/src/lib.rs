use querywire::{Compiler, Options};
use wasm_bindgen::prelude::*;

/// Compile a JSON query into the JSON form of its request.
#[wasm_bindgen]
pub fn compile(query_json: &str) -> Result<String, String> {
    let compiler = Compiler::new(Options::default());
    let request = compiler
        .compile_json(query_json)
        .map_err(|e| e.to_string())?;
    serde_json::to_string(&request).map_err(|e| e.to_string())
}
