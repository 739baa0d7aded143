use utoipa::OpenApi;

use crate::routes::resources;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Car24 API Gateway",
        version = "0.1.0",
        description = "REST front for the Car24 client and order services."
    ),
    paths(
        crate::routes::otp::send_otp,
        crate::routes::otp::verify_otp,
        crate::routes::health,
    ),
    components(schemas(
        crate::dto::ErrorEnvelope,
        crate::dto::PatchBody,
        crate::dto::HealthResponse,
    )),
    tags(
        (name = "auth", description = "One-time code login"),
        (name = "user", description = "Registered clients"),
        (name = "order", description = "Rental orders"),
        (name = "car", description = "Fleet vehicles"),
        (name = "discount", description = "Price discounts"),
        (name = "mechanic", description = "Service mechanics"),
        (name = "model", description = "Vehicle models"),
        (name = "tarif", description = "Rental tariffs"),
        (name = "system", description = "Health and system status"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// The complete document: the static part plus every resource module.
pub fn api_doc() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
        .merge_from(resources::users::Doc::openapi())
        .merge_from(resources::orders::Doc::openapi())
        .merge_from(resources::cars::Doc::openapi())
        .merge_from(resources::discounts::Doc::openapi())
        .merge_from(resources::mechanics::Doc::openapi())
        .merge_from(resources::models::Doc::openapi())
        .merge_from(resources::tarifs::Doc::openapi())
}

/// Adds the Bearer session token security scheme to the document.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Session token from GET /check. Enforced when GATEWAY_REQUIRE_AUTH is true.",
                        ))
                        .build(),
                ),
            );
        }
    }
}
