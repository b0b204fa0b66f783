use std::future::ready;
use std::future::Ready;
use std::time::Instant;

use actix_web::dev::forward_ready;
use actix_web::dev::Service;
use actix_web::dev::ServiceRequest;
use actix_web::dev::ServiceResponse;
use actix_web::dev::Transform;
use actix_web::Error;
use futures::future::LocalBoxFuture;
use slog::error;
use slog::info;
use slog::warn;
use slog::Logger;

/// Actix Web middleware to log requests.
///
/// Successful requests are logged at INFO level, client errors at WARNING
/// and server errors (or failures to produce a response) at ERROR.
pub struct LoggingMiddleware {
    logger: Logger,
}

impl LoggingMiddleware {
    pub fn new(logger: Logger) -> LoggingMiddleware {
        LoggingMiddleware { logger }
    }
}

// `S` - type of the next service
// `B` - type of response's body
impl<S, B> Transform<S, ServiceRequest> for LoggingMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MiddlewareService {
            logger: self.logger.clone(),
            service,
        }))
    }
}

/// Inner middleware to process requests on behalf of `LoggingMiddleware`.
pub struct MiddlewareService<S> {
    logger: Logger,
    service: S,
}

impl<S, B> Service<ServiceRequest> for MiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let logger = self.logger.clone();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let start = Instant::now();
        let response = self.service.call(req);
        Box::pin(async move {
            let response = match response.await {
                Ok(response) => response,
                Err(error) => {
                    let duration = start.elapsed().as_secs_f64();
                    error!(
                        logger,
                        "Request failed";
                        "method" => method,
                        "path" => path,
                        "duration" => duration,
                        "error" => %error,
                    );
                    return Err(error);
                }
            };
            let duration = start.elapsed().as_secs_f64();
            let status = response.response().status();
            if status.is_server_error() {
                error!(
                    logger,
                    "Request handled";
                    "success" => false,
                    "method" => method,
                    "path" => path,
                    "status" => status.as_u16(),
                    "duration" => duration,
                );
            } else if status.is_client_error() {
                warn!(
                    logger,
                    "Request handled";
                    "success" => false,
                    "method" => method,
                    "path" => path,
                    "status" => status.as_u16(),
                    "duration" => duration,
                );
            } else {
                info!(
                    logger,
                    "Request handled";
                    "success" => true,
                    "method" => method,
                    "path" => path,
                    "status" => status.as_u16(),
                    "duration" => duration,
                );
            }
            Ok(response)
        })
    }
}
