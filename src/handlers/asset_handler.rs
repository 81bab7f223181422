use actix_web::{get, http::header, HttpResponse};

const FALLBACK_SVG: &str = include_str!("../../assets/fallback.svg");

/// Bundled image returned whenever no illustration can be resolved.
#[get("/assets/fallback.svg")]
async fn fallback_asset() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("image/svg+xml")
        .insert_header((header::CACHE_CONTROL, "public, max-age=86400"))
        .body(FALLBACK_SVG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FALLBACK_ASSET_PATH;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_fallback_asset_is_served() {
        let app = test::init_service(App::new().service(fallback_asset)).await;

        let req = test::TestRequest::get().uri(FALLBACK_ASSET_PATH).to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "image/svg+xml"
        );
        let body = test::read_body(resp).await;
        assert!(body.starts_with(b"<svg"));
    }
}
