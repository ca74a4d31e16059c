use std::{fs, io};
use std::io::ErrorKind;
use std::sync::Arc;

use ntex::web;
use ntex::web::HttpRequest;
use ntex_files::NamedFile;
use spdlog::{debug, info, warn};

use crate::config::Config;
use crate::content::post_loader::PostLoader;
use crate::cookie_store::{request_theme, RequestTheme};
use crate::lang_url::language_url;
use crate::locale::Locale;
use crate::paginator::Paginator;
use crate::query_string::QueryString;
use crate::view::layout::Layout;
use crate::view::list_renderer::ListRenderer;
use crate::view::post_renderer::PostRenderer;

const CLIENT_HINT: &str = "Sec-CH-Prefers-Color-Scheme";
const CLIENT_HINT_HEADER: &str = "sec-ch-prefers-color-scheme";

struct AppState {
    config: Config,
    loader: PostLoader,
}

type AppData = web::types::State<Arc<AppState>>;

fn query_of(req: &HttpRequest) -> QueryString {
    QueryString::from(req.uri().query().unwrap_or(""))
}

fn theme_of(req: &HttpRequest, state: &AppState) -> RequestTheme {
    let headers = req.headers();
    let cookies = headers.get("cookie").map(|v| v.as_bytes());
    let hint = headers.get(CLIENT_HINT_HEADER).and_then(|v| v.to_str().ok());
    request_theme(&state.config.theme.storage_key, cookies, hint)
}

fn layout_of(req: &HttpRequest, state: &AppState, locale: Locale, theme: &RequestTheme) -> Layout {
    let uri = req.uri().path_and_query().map_or(req.path(), |pq| pq.as_str());
    Layout::new(&state.config.site, locale, uri, theme.current(), theme.root().to_attr())
}

fn read_template(config: &Config, name: &str) -> io::Result<String> {
    let template_path = config.paths.template_dir.join(name);
    fs::read_to_string(&template_path)
        .map_err(|e| io::Error::new(e.kind(), format!("Error reading template {}: {}", template_path.display(), e)))
}

/// Every page response carries the theme cookie written while resolving and
/// asks the browser for the color scheme hint on later requests.
fn html_response(theme: &RequestTheme, body: String) -> web::HttpResponse {
    let mut builder = web::HttpResponse::Ok();
    builder
        .content_type("text/html; charset=utf-8")
        .header("Accept-CH", CLIENT_HINT)
        .header("Vary", "Cookie, Sec-CH-Prefers-Color-Scheme");
    for cookie in theme.store().set_cookie_headers() {
        builder.header("Set-Cookie", cookie);
    }
    builder.body(body)
}

fn error_response(what: &str, e: io::Error) -> web::HttpResponse {
    match e.kind() {
        ErrorKind::NotFound => web::HttpResponse::NotFound()
            .body(format!("{} not found", what)),
        ErrorKind::PermissionDenied => web::HttpResponse::Forbidden()
            .body("Access forbidden"),
        _ => {
            warn!("Error rendering {}. Desc={}", what, e);
            web::HttpResponse::InternalServerError()
                .body(format!("Error rendering {}: {}", what, e))
        }
    }
}

fn redirect(location: String) -> web::HttpResponse {
    web::HttpResponse::TemporaryRedirect()
        .header("Location", location)
        .content_type("text/html; charset=utf-8")
        .finish()
}

fn render_list(state: &AppState, template: &str, layout: Layout, locale: Locale, cur_page: u32, paginate: bool) -> io::Result<String> {
    let posts = state.loader.load_all(locale)?;
    let paginator = Paginator::from(&posts, state.config.defaults.page_size);
    let cur_page = paginator.clamp_page(cur_page);

    // Only an empty list has no page to show
    let content_page = paginator.get_page(cur_page).unwrap_or(&[]);

    let template_src = read_template(&state.config, template)?;
    let renderer = ListRenderer::new(&template_src, &state.config.defaults.summary_tag)?;
    let page_count = if paginate { paginator.page_count() } else { 0 };
    renderer.render(layout, content_page, cur_page, page_count)
}

fn index_page(req: &HttpRequest, state: &AppState, locale: Locale) -> web::HttpResponse {
    let theme = theme_of(req, state);
    let layout = layout_of(req, state, locale, &theme);
    match render_list(state, "index.tpl", layout, locale, 1, false) {
        Ok(rendered) => html_response(&theme, rendered),
        Err(e) => error_response("index", e),
    }
}

fn list_page(req: &HttpRequest, state: &AppState, locale: Locale) -> web::HttpResponse {
    let theme = theme_of(req, state);
    let layout = layout_of(req, state, locale, &theme);
    let cur_page = query_of(req).get_page();
    match render_list(state, "postlist.tpl", layout, locale, cur_page, true) {
        Ok(rendered) => html_response(&theme, rendered),
        Err(e) => error_response("post list", e),
    }
}

fn post_page(req: &HttpRequest, state: &AppState, locale: Locale, slug: &str) -> web::HttpResponse {
    let theme = theme_of(req, state);
    let layout = layout_of(req, state, locale, &theme);
    let rendered = state.loader.find(locale, slug)
        .and_then(|post| {
            let template_src = read_template(&state.config, "view.tpl")?;
            let renderer = PostRenderer::new(&template_src)?;
            renderer.render(layout, &post)
        });

    match rendered {
        Ok(rendered) => html_response(&theme, rendered),
        Err(e) => error_response(&format!("post {}", slug), e),
    }
}

/// Locale of a prefixed route. The default locale has no prefix, so `/pt/...`
/// is answered with a redirect to the unprefixed path.
fn prefixed_locale(req: &HttpRequest, lang: &str) -> Result<Locale, web::HttpResponse> {
    match Locale::from_code(lang) {
        Ok(locale) if !locale.is_default() => Ok(locale),
        Ok(locale) => Err(redirect(language_url(locale, locale, Some(req.path())))),
        Err(e) => {
            debug!("Rejecting route. Desc={}", e);
            Err(web::HttpResponse::NotFound().body("Page not found"))
        }
    }
}

#[web::get("/")]
async fn index(req: HttpRequest, state: AppData) -> web::HttpResponse {
    index_page(&req, &state, Locale::DEFAULT)
}

#[web::get("/blog/")]
async fn list(req: HttpRequest, state: AppData) -> web::HttpResponse {
    list_page(&req, &state, Locale::DEFAULT)
}

#[web::get("/blog/{slug}/")]
async fn view(req: HttpRequest, slug: web::types::Path<String>, state: AppData) -> web::HttpResponse {
    post_page(&req, &state, Locale::DEFAULT, &slug.into_inner())
}

#[web::get("/theme/toggle")]
async fn theme_toggle(req: HttpRequest, state: AppData) -> web::HttpResponse {
    let back = query_of(&req).get_back();
    let mut theme = theme_of(&req, &state);
    let next = theme.toggle();
    debug!("Theme toggled to {}, back to {}", next, back);

    let mut builder = web::HttpResponse::SeeOther();
    builder.header("Location", back);
    for cookie in theme.store().set_cookie_headers() {
        builder.header("Set-Cookie", cookie);
    }
    builder.finish()
}

#[web::get("/public/{file_name}")]
async fn public_files(path: web::types::Path<String>, state: AppData) -> Result<NamedFile, web::Error> {
    if path.contains("..") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let file_path = state.config.paths.public_dir.join(path.into_inner());
    Ok(NamedFile::open(file_path)?)
}

// Begin: Redirect region --------
#[web::get("/blog")]
async fn list_wo_slash() -> web::HttpResponse {
    redirect("/blog/".to_string())
}

#[web::get("/blog/{slug}")]
async fn view_wo_slash(slug: web::types::Path<String>) -> web::HttpResponse {
    redirect(format!("/blog/{}/", slug.into_inner()))
}

#[web::get("/{lang}")]
async fn locale_wo_slash(req: HttpRequest, lang: web::types::Path<String>) -> web::HttpResponse {
    match prefixed_locale(&req, &lang) {
        Ok(locale) => redirect(format!("{}/", locale.route_prefix())),
        Err(response) => response,
    }
}

#[web::get("/{lang}/blog")]
async fn locale_list_wo_slash(req: HttpRequest, lang: web::types::Path<String>) -> web::HttpResponse {
    match prefixed_locale(&req, &lang) {
        Ok(locale) => redirect(format!("{}/blog/", locale.route_prefix())),
        Err(response) => response,
    }
}

#[web::get("/{lang}/blog/{slug}")]
async fn locale_view_wo_slash(req: HttpRequest, path: web::types::Path<(String, String)>) -> web::HttpResponse {
    let (lang, slug) = path.into_inner();
    match prefixed_locale(&req, &lang) {
        Ok(locale) => redirect(format!("{}/blog/{}/", locale.route_prefix(), slug)),
        Err(response) => response,
    }
}
// End: Redirect region --------

#[web::get("/{lang}/")]
async fn locale_index(req: HttpRequest, lang: web::types::Path<String>, state: AppData) -> web::HttpResponse {
    match prefixed_locale(&req, &lang) {
        Ok(locale) => index_page(&req, &state, locale),
        Err(response) => response,
    }
}

#[web::get("/{lang}/blog/")]
async fn locale_list(req: HttpRequest, lang: web::types::Path<String>, state: AppData) -> web::HttpResponse {
    match prefixed_locale(&req, &lang) {
        Ok(locale) => list_page(&req, &state, locale),
        Err(response) => response,
    }
}

#[web::get("/{lang}/blog/{slug}/")]
async fn locale_view(req: HttpRequest, path: web::types::Path<(String, String)>, state: AppData) -> web::HttpResponse {
    let (lang, slug) = path.into_inner();
    match prefixed_locale(&req, &lang) {
        Ok(locale) => post_page(&req, &state, locale, &slug),
        Err(response) => response,
    }
}

// Unprefixed routes first, `/{lang}` would swallow them otherwise
fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(public_files)
        .service(theme_toggle)
        .service(list)
        .service(list_wo_slash)
        .service(view)
        .service(view_wo_slash)
        .service(locale_index)
        .service(locale_wo_slash)
        .service(locale_list)
        .service(locale_list_wo_slash)
        .service(locale_view)
        .service(locale_view_wo_slash);
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let loader = PostLoader::new(config.paths.posts_dir.clone(), config.defaults.words_per_minute);
    for locale in Locale::ALL {
        for post in loader.load_all(locale)? {
            info!("Post [{}]: {}", locale, post.slug);
        }
    }

    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let app_state = Arc::new(AppState {
        config,
        loader,
    });

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .configure(routes)
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use ntex::http::StatusCode;
    use ntex::web::test;
    use tempfile::TempDir;

    use crate::config::parse_config;
    use crate::test_data::{posts_fixture, LIST_TPL, VIEW_TPL};

    use super::*;

    const CFG: &str = r##"
[site]
title = "Azagatti"
url = "https://azagatti.dev"

[paths]
template_dir = "${exe_dir}/tpl"
public_dir = "${exe_dir}/public"
posts_dir = "${exe_dir}"

[defaults]
page_size = 6

[server]
address = "127.0.0.1"
port = 8001
"##;

    fn site_fixture() -> (TempDir, Arc<AppState>) {
        let tmp = posts_fixture();
        let tpl = tmp.path().join("tpl");
        fs::create_dir_all(&tpl).unwrap();
        fs::write(tpl.join("index.tpl"), LIST_TPL).unwrap();
        fs::write(tpl.join("postlist.tpl"), LIST_TPL).unwrap();
        fs::write(tpl.join("view.tpl"), VIEW_TPL).unwrap();

        let config = parse_config(CFG, tmp.path()).unwrap();
        let loader = PostLoader::new(config.paths.posts_dir.clone(), config.defaults.words_per_minute);
        (tmp, Arc::new(AppState { config, loader }))
    }

    fn header<'a>(resp: &'a web::WebResponse, name: &str) -> Option<&'a str> {
        resp.headers().get(name).and_then(|v| v.to_str().ok())
    }

    fn set_cookies(resp: &web::WebResponse) -> Vec<String> {
        resp.headers().get_all("set-cookie")
            .filter_map(|v| v.to_str().ok())
            .map(|v| v.to_string())
            .collect()
    }

    #[ntex::test]
    async fn test_first_visit_sets_theme_cookie() {
        let (_tmp, state) = site_fixture();
        let app = test::init_service(web::App::new().state(state).configure(routes)).await;

        let req = test::TestRequest::with_uri("/")
            .header("sec-ch-prefers-color-scheme", "dark")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(header(&resp, "accept-ch"), Some(CLIENT_HINT));
        let cookies = set_cookies(&resp);
        assert_eq!(cookies.len(), 1);
        assert!(cookies[0].starts_with("azagatti%3Atheme=dark;"), "{}", cookies[0]);

        let body = test::read_body(resp).await;
        assert!(String::from_utf8_lossy(&body).starts_with(r#"<html class="dark" lang="pt">"#));
    }

    #[ntex::test]
    async fn test_stored_theme_is_not_rewritten() {
        let (_tmp, state) = site_fixture();
        let app = test::init_service(web::App::new().state(state).configure(routes)).await;

        let req = test::TestRequest::with_uri("/en/blog/typing-the-web/")
            .header("cookie", "azagatti%3Atheme=light")
            .header("sec-ch-prefers-color-scheme", "dark")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(set_cookies(&resp).is_empty());

        let body = test::read_body(resp).await;
        let body = String::from_utf8_lossy(&body);
        assert!(body.starts_with(r#"<html class="" lang="en">"#), "{}", body);
        assert!(body.contains("<h2>Typing the web</h2>"), "{}", body);
    }

    #[ntex::test]
    async fn test_theme_toggle() {
        let (_tmp, state) = site_fixture();
        let app = test::init_service(web::App::new().state(state).configure(routes)).await;

        let req = test::TestRequest::with_uri("/theme/toggle?back=%2Fen%2Fblog%2F%3Fpage%3D2")
            .header("cookie", "azagatti%3Atheme=light")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(header(&resp, "location"), Some("/en/blog/?page=2"));
        let cookies = set_cookies(&resp);
        assert_eq!(cookies.len(), 1);
        assert!(cookies[0].starts_with("azagatti%3Atheme=dark;"), "{}", cookies[0]);

        let req = test::TestRequest::with_uri("/theme/toggle?back=https%3A%2F%2Fevil.example")
            .header("cookie", "azagatti%3Atheme=dark")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(header(&resp, "location"), Some("/"));
        assert!(set_cookies(&resp)[0].starts_with("azagatti%3Atheme=light;"));
    }

    #[ntex::test]
    async fn test_locale_routes() {
        let (_tmp, state) = site_fixture();
        let app = test::init_service(web::App::new().state(state).configure(routes)).await;

        let cases = [
            ("/pt/blog/", StatusCode::TEMPORARY_REDIRECT, Some("/blog/")),
            ("/pt/blog/tipando-a-web/", StatusCode::TEMPORARY_REDIRECT, Some("/blog/tipando-a-web/")),
            ("/blog", StatusCode::TEMPORARY_REDIRECT, Some("/blog/")),
            ("/en", StatusCode::TEMPORARY_REDIRECT, Some("/en/")),
            ("/en/blog", StatusCode::TEMPORARY_REDIRECT, Some("/en/blog/")),
            ("/en/blog/typing-the-web", StatusCode::TEMPORARY_REDIRECT, Some("/en/blog/typing-the-web/")),
            ("/fr/", StatusCode::NOT_FOUND, None),
            ("/fr/blog", StatusCode::NOT_FOUND, None),
            ("/en/blog/", StatusCode::OK, None),
            ("/blog/tipando-a-web/", StatusCode::OK, None),
            ("/blog/nope/", StatusCode::NOT_FOUND, None),
        ];

        for (uri, status, location) in cases {
            let resp = test::call_service(&app, test::TestRequest::with_uri(uri).to_request()).await;
            assert_eq!(resp.status(), status, "{}", uri);
            assert_eq!(header(&resp, "location"), location, "{}", uri);
        }
    }

    #[ntex::test]
    async fn test_list_keeps_english_posts_apart() {
        let (_tmp, state) = site_fixture();
        let app = test::init_service(web::App::new().state(state).configure(routes)).await;

        let resp = test::call_service(&app, test::TestRequest::with_uri("/en/blog/").to_request()).await;
        let body = test::read_body(resp).await;
        let body = String::from_utf8_lossy(&body);
        assert!(body.contains("[Typing the web|January 5, 2024"), "{}", body);
        assert!(body.contains("[Older|May 22, 2020"), "{}", body);
        assert!(!body.contains("Tipando"), "{}", body);
    }
}
