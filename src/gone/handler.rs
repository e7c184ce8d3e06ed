use std::sync::Arc;

use maud::Markup;
use poem::http::StatusCode;
use poem::{IntoResponse, Response};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::gone::{GoneError, GoneRequest, GoneResolver, Redirect, Resolution};
use crate::prelude::*;
use crate::web::render::{cache_control, PageContext, PageRequest, PageTypeRenderer};

/// Status line of the 410 page as written by [`GonePage::generate`].
pub const STATUS_LINE: &str = "HTTP/1.1 410 Not Found";

/// Handler of the `error_410` page type.
pub struct GonePage {
    resolver: GoneResolver,

    /// Renders the body of the 410 page.
    regular: Arc<dyn PageTypeRenderer>,
}

impl GonePage {
    pub fn new(resolver: GoneResolver, regular: Arc<dyn PageTypeRenderer>) -> Self {
        Self { resolver, regular }
    }

    /// Resolves the request and makes the 410 page current in the context.
    async fn prepare(
        &self,
        request: &PageRequest,
        context: &mut PageContext,
    ) -> Result<Option<Redirect>, GoneError> {
        let gone_request = GoneRequest {
            root: &context.root,
            path: &request.path,
            uri: &request.uri,
            preview: request.preview,
        };
        let page = match self.resolver.resolve(&gone_request).await? {
            Resolution::Redirect(redirect) => return Ok(Some(redirect)),
            Resolution::Gone(page) => page,
        };
        let mut page = self.resolver.repository().load_details(page).await?;

        // Reset the inherited cache timeouts.
        page.normalize_cache();

        context.set_page(page);
        Ok(None)
    }

    /// Writes the complete HTTP response right into the writer.
    #[instrument(level = "info", skip_all, fields(uri = request.uri.as_str()))]
    pub async fn generate<W: AsyncWrite + Unpin + Send>(
        &self,
        request: &PageRequest,
        context: &mut PageContext,
        writer: &mut W,
    ) -> Result<(), GoneError> {
        let head = match self.prepare(request, context).await? {
            Some(redirect) => {
                let status = redirect.status;
                format!(
                    "HTTP/1.1 {} {}\r\nLocation: {}\r\nCache-Control: no-cache\r\nContent-Length: 0\r\n\r\n",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or_default(),
                    redirect.location,
                )
            }
            None => {
                let body = self.render(context)?.into_string();
                let page = context
                    .page()
                    .ok_or_else(|| anyhow!("the 410 page is not set"))?;
                format!(
                    "{}\r\nContent-Type: text/html; charset=utf-8\r\nCache-Control: {}\r\nContent-Length: {}\r\n\r\n{}",
                    STATUS_LINE,
                    cache_control(page),
                    body.len(),
                    body,
                )
            }
        };
        writer
            .write_all(head.as_bytes())
            .await
            .context("failed to write the response")?;
        writer.flush().await.context("failed to flush the response")?;
        Ok(())
    }
}

#[async_trait]
impl PageTypeRenderer for GonePage {
    fn render(&self, context: &PageContext) -> Result<Markup> {
        self.regular.render(context)
    }

    #[instrument(level = "info", skip_all, fields(uri = request.uri.as_str()))]
    async fn get_response(
        &self,
        request: &PageRequest,
        context: &mut PageContext,
    ) -> poem::Result<Response> {
        if let Some(redirect) = self.prepare(request, context).await? {
            return Ok(redirect.into_response());
        }
        let mut response = self.regular.build_response(context)?;
        response.set_status(StatusCode::GONE);
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use poem::http::header;

    use super::*;
    use crate::gone::RequestPath;
    use crate::pages::{MemoryRepository, Page, PageType};
    use crate::web::render::RegularPage;

    /// Renders with a fixed status, like the default response of a page would.
    struct OkRenderer;

    #[async_trait]
    impl PageTypeRenderer for OkRenderer {
        fn render(&self, _context: &PageContext) -> Result<Markup> {
            Ok(maud::html! { "gone" })
        }

        async fn get_response(
            &self,
            _request: &PageRequest,
            _context: &mut PageContext,
        ) -> poem::Result<Response> {
            Ok(StatusCode::OK.into_response())
        }

        fn build_response(&self, _context: &PageContext) -> Result<Response> {
            Ok(Response::builder().status(StatusCode::ACCEPTED).body("gone"))
        }
    }

    fn pages() -> Vec<Page> {
        let mut root = Page::new(1, 0, PageType::Root);
        root.language = "en".to_string();
        root.include_cache = true;
        root.cache = 86400;
        root.client_cache = 3600;
        let mut gone = Page::new(2, 1, PageType::Error410);
        gone.title = "Gone".to_string();
        gone.alias = "gone".to_string();
        vec![root, gone]
    }

    fn gone_page(pages: Vec<Page>, regular: Arc<dyn PageTypeRenderer>) -> GonePage {
        let resolver = GoneResolver::new(Arc::new(MemoryRepository::new(pages)), false);
        GonePage::new(resolver, regular)
    }

    fn request() -> PageRequest {
        PageRequest {
            page: Page::new(2, 1, PageType::Error410),
            path: RequestPath::parse("/gone", ""),
            uri: "http://example.org/gone".to_string(),
            preview: false,
        }
    }

    fn context() -> PageContext {
        let mut root = Page::new(1, 0, PageType::Root);
        root.language = "en".to_string();
        PageContext::new(root)
    }

    #[tokio::test]
    async fn get_response_ok() -> Result {
        let handler = gone_page(pages(), Arc::new(RegularPage));
        let mut context = context();
        let response = handler
            .get_response(&request(), &mut context)
            .await
            .map_err(|error| anyhow!("{}", error))?;
        assert_eq!(response.status(), StatusCode::GONE);
        assert_eq!(response.header(header::CACHE_CONTROL), Some("no-cache"));

        let page = context.page().ok_or_else(|| anyhow!("no page"))?;
        assert_eq!(page.id, 2);
        assert_eq!((page.cache, page.client_cache), (0, 0));
        Ok(())
    }

    #[tokio::test]
    async fn get_response_forces_status_ok() -> Result {
        let handler = gone_page(pages(), Arc::new(OkRenderer));
        let response = handler
            .get_response(&request(), &mut context())
            .await
            .map_err(|error| anyhow!("{}", error))?;
        assert_eq!(response.status(), StatusCode::GONE);
        Ok(())
    }

    #[tokio::test]
    async fn get_response_keeps_own_cache_ok() -> Result {
        let mut pages = pages();
        pages[1].include_cache = true;
        pages[1].client_cache = 120;
        let handler = gone_page(pages, Arc::new(RegularPage));
        let response = handler
            .get_response(&request(), &mut context())
            .await
            .map_err(|error| anyhow!("{}", error))?;
        assert_eq!(response.header(header::CACHE_CONTROL), Some("public, max-age=120"));
        Ok(())
    }

    #[tokio::test]
    async fn get_response_not_found_ok() {
        let handler = gone_page(pages()[..1].to_vec(), Arc::new(RegularPage));
        match handler.get_response(&request(), &mut context()).await {
            Err(error) => assert_eq!(error.status(), StatusCode::NOT_FOUND),
            Ok(_) => unreachable!(),
        }
    }

    #[tokio::test]
    async fn generate_ok() -> Result {
        let handler = gone_page(pages(), Arc::new(RegularPage));
        let mut output = Vec::new();
        handler.generate(&request(), &mut context(), &mut output).await?;

        let output = String::from_utf8(output)?;
        assert!(output.starts_with("HTTP/1.1 410 Not Found\r\n"));
        assert!(output.contains("\r\nCache-Control: no-cache\r\n"));
        assert!(output.contains("<title>Gone</title>"));
        Ok(())
    }

    #[tokio::test]
    async fn generate_forward_ok() -> Result {
        let mut pages = pages();
        pages[1].auto_forward = true;
        pages[1].jump_to = Some(3);
        let mut target = Page::new(3, 1, PageType::Regular);
        target.alias = "new".to_string();
        pages.push(target);
        let handler = gone_page(pages, Arc::new(RegularPage));
        let mut output = Vec::new();
        handler.generate(&request(), &mut context(), &mut output).await?;

        let output = String::from_utf8(output)?;
        assert!(output.starts_with("HTTP/1.1 301 Moved Permanently\r\nLocation: /new\r\n"));
        Ok(())
    }
}
