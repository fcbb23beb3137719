use carphoto_config::{AnyOrArray, CorsConfig};
use http::header::HeaderName;
use http::{HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Build a Tower CORS layer from configuration
///
/// Entries that fail to parse are skipped with a warning.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new()
        .allow_origin(match &config.origins {
            AnyOrArray::Any => AllowOrigin::any(),
            AnyOrArray::List(origins) => AllowOrigin::list(parse_all::<HeaderValue>("origin", origins)),
        })
        .allow_methods(match &config.methods {
            AnyOrArray::Any => AllowMethods::any(),
            AnyOrArray::List(methods) => AllowMethods::list(parse_all::<Method>("method", methods)),
        })
        .allow_headers(match &config.headers {
            AnyOrArray::Any => AllowHeaders::any(),
            AnyOrArray::List(headers) => AllowHeaders::list(parse_all::<HeaderName>("header", headers)),
        });

    if !config.expose_headers.is_empty() {
        layer = layer.expose_headers(parse_all::<HeaderName>("expose header", &config.expose_headers));
    }

    if config.credentials {
        layer = layer.allow_credentials(true);
    }

    if let Some(duration) = config.max_age_duration() {
        layer = layer.max_age(duration);
    }

    if config.private_network {
        layer = layer.allow_private_network(true);
    }

    layer
}

fn parse_all<T: std::str::FromStr>(kind: &str, values: &[String]) -> Vec<T> {
    values
        .iter()
        .filter_map(|value| {
            let parsed = value.parse().ok();
            if parsed.is_none() {
                tracing::warn!(%value, "ignoring invalid CORS {kind}");
            }
            parsed
        })
        .collect()
}
