use heatcalc::output::Output;
use heatcalc::{run_project, ProjectFlags};
use lambda_http::{run, service_fn, tracing, Body, Error, Request, RequestExt, Response};
use parking_lot::Mutex;
use serde_json::json;
use std::io;
use std::io::{ErrorKind, Write};
use std::str::from_utf8;
use std::sync::Arc;
use uuid::Uuid;

/// Handles a POST whose body is a heat pump or solar PV input document.
///
/// Responds with the results as JSON, or with the CSV summary and breakdown when the request
/// asks for `?format=csv`. Requests that cannot be calculated get a 422 with an errors array.
async fn function_handler(event: Request) -> Result<Response<Body>, Error> {
    let input = match event.body() {
        Body::Empty => "",
        Body::Text(text) => text.as_str(),
        Body::Binary(_) => return unprocessable("Request body must be JSON text, not binary."),
    }
    .as_bytes();

    let wants_csv = event
        .query_string_parameters()
        .first("format")
        .is_some_and(|format| format.eq_ignore_ascii_case("csv"));

    let output = LambdaOutput::new();
    let flags = if wants_csv {
        ProjectFlags::CSV_SUMMARY | ProjectFlags::BREAKDOWN_CSV
    } else {
        ProjectFlags::empty()
    };

    let resp = match run_project(input, &output, None, &flags) {
        Ok(_) if wants_csv => Response::builder()
            .status(200)
            .header("Content-Type", "text/csv")
            .body(Body::from(output))
            .map_err(Box::new)?,
        Ok(results) => Response::builder()
            .status(200)
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(&results)?))
            .map_err(Box::new)?,
        Err(e) => return unprocessable(&e.to_string()),
    };

    Ok(resp)
}

fn unprocessable(detail: &str) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(422)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(&json!({"errors": [{"id": Uuid::new_v4(), "status": "422", "detail": detail}]}))?))
        .map_err(Box::new)?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    run(service_fn(function_handler)).await
}

/// This output uses a shared string that individual "file" writers (the FileLikeStringWriter type)
/// can write to - this string can then be used as the response body for the Lambda.
#[derive(Debug)]
struct LambdaOutput(Arc<Mutex<String>>);

impl LambdaOutput {
    fn new() -> Self {
        // a summary and a 25 year breakdown fit comfortably
        Self(Arc::new(Mutex::new(String::with_capacity(2usize.pow(12)))))
    }
}

impl Output for &LambdaOutput {
    fn writer_for_location_key(
        &self,
        location_key: &str,
        file_extension: &str,
    ) -> anyhow::Result<impl Write> {
        Ok(FileLikeStringWriter::new(
            self.0.clone(),
            location_key,
            file_extension,
        ))
    }
}

impl From<LambdaOutput> for Body {
    fn from(value: LambdaOutput) -> Self {
        let body = value.0.lock().clone();
        body.into()
    }
}

/// Represents a writer for an individual "file".
struct FileLikeStringWriter {
    string: Arc<Mutex<String>>,
    location_key: String,
    file_extension: String,
    has_output_file_header: bool,
}

impl FileLikeStringWriter {
    fn new(string: Arc<Mutex<String>>, location_key: &str, file_extension: &str) -> Self {
        Self {
            string,
            location_key: location_key.to_string(),
            file_extension: file_extension.to_string(),
            has_output_file_header: false,
        }
    }
}

impl Write for FileLikeStringWriter {
    /// Appends to this "file", starting it with a `# <key>.<ext>` line so the sections of the
    /// combined body can be told apart.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let utf8 = from_utf8(buf).map_err(|_| {
            io::Error::new(ErrorKind::InvalidData, "Tried to write out invalid UTF-8.")
        })?;
        let mut output_string = self.string.lock();
        if !self.has_output_file_header {
            if !output_string.is_empty() {
                output_string.push('\n');
            }
            output_string.push_str(&format!(
                "# {}.{}\n",
                self.location_key, self.file_extension
            ));
            self.has_output_file_header = true;
        }
        output_string.push_str(utf8);
        Ok(utf8.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
