//! Host boundary traits.
//!
//! The gate never sees a concrete host request or response type. A host
//! integration implements these two traits over its own objects.

/// Read access to an incoming request.
///
/// # Examples
///
/// ```
/// use query_token_gate::web::RequestReader;
///
/// struct HostRequest {
///     target: String,
/// }
///
/// impl RequestReader for HostRequest {
///     fn uri(&self) -> &str {
///         &self.target
///     }
/// }
/// ```
pub trait RequestReader {
    /// The request target: path plus optional `?query`.
    fn uri(&self) -> &str;

    /// Identifier attached to log events for this request, if the host has one.
    fn request_id(&self) -> Option<&str> {
        None
    }
}

/// Write access to the response the host will send.
///
/// Writes are infallible from the gate's point of view. A host whose sink
/// can fail handles that failure inside its implementation.
pub trait ResponseWriter {
    /// Sets the response status code.
    fn set_status(&mut self, status: u16);

    /// Sets a response header, replacing any previous value.
    fn set_header(&mut self, name: &str, value: &str);

    /// Appends text to the response body.
    fn write_body(&mut self, body: &str);
}

impl<T: RequestReader + ?Sized> RequestReader for &T {
    fn uri(&self) -> &str {
        (**self).uri()
    }

    fn request_id(&self) -> Option<&str> {
        (**self).request_id()
    }
}

impl<T: ResponseWriter + ?Sized> ResponseWriter for &mut T {
    fn set_status(&mut self, status: u16) {
        (**self).set_status(status);
    }

    fn set_header(&mut self, name: &str, value: &str) {
        (**self).set_header(name, value);
    }

    fn write_body(&mut self, body: &str) {
        (**self).write_body(body);
    }
}
