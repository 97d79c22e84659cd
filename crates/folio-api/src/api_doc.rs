//! OpenAPI documentation, served at `/api/openapi.json` and browsable at `/docs`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error;
use crate::handlers;
use folio_core::models;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Folio API",
        version = "0.1.0",
        description = "Photography portfolio backend: public gallery, image delivery, contact form and an authenticated admin area for sections, photo uploads and messages."
    ),
    modifiers(&BearerAuth),
    paths(
        // Public gallery
        handlers::sections::list_sections,
        handlers::sections::get_section,
        handlers::photos::list_photos,
        handlers::photos::list_section_photos,
        handlers::photos::record_view,
        handlers::images::serve_image,
        handlers::contact::submit_contact_message,
        // Auth
        handlers::auth::login,
        handlers::auth::register,
        handlers::auth::current_user,
        // Admin
        handlers::stats::get_stats,
        handlers::photos::admin_list_photos,
        handlers::photos::upload_photo,
        handlers::photos::update_photo,
        handlers::photos::delete_photo,
        handlers::sections::admin_list_sections,
        handlers::sections::create_section,
        handlers::sections::update_section,
        handlers::sections::delete_section,
        handlers::messages::list_messages,
        handlers::messages::mark_message_read,
    ),
    components(
        schemas(
            models::Section,
            models::SectionWithPhotos,
            models::CreateSectionRequest,
            models::UpdateSectionRequest,
            models::Photo,
            models::PhotoWithSection,
            models::UpdatePhotoRequest,
            models::TagsInput,
            models::ContactMessage,
            models::CreateContactMessageRequest,
            models::GalleryStats,
            models::UserResponse,
            models::LoginRequest,
            models::RegisterRequest,
            models::AuthResponse,
            handlers::SuccessResponse,
            handlers::photos::UploadPhotoForm,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "sections", description = "Public section listing"),
        (name = "photos", description = "Public photo listing and view counting"),
        (name = "images", description = "Stored image delivery"),
        (name = "contact", description = "Contact form"),
        (name = "auth", description = "Login, registration and current user"),
        (name = "admin", description = "Authenticated gallery management"),
    )
)]
pub struct ApiDoc;
