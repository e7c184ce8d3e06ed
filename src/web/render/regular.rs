use maud::{html, Markup, DOCTYPE};
use poem::Response;

use crate::prelude::*;
use crate::web::partials::{footer, headers};
use crate::web::render::{PageContext, PageRequest, PageTypeRenderer};

/// Plain content page.
pub struct RegularPage;

#[async_trait]
impl PageTypeRenderer for RegularPage {
    fn render(&self, context: &PageContext) -> Result<Markup> {
        let page = context
            .page()
            .ok_or_else(|| anyhow!("there is no page to render"))?;
        let markup = html! {
            (DOCTYPE)
            html lang=(context.language()) {
                head {
                    (headers())
                    title { (page.title) }
                }
                body {
                    section.section {
                        div.container {
                            h1.title { (page.title) }
                            div.content {
                                @for paragraph in page.content.split("\n\n").filter(|paragraph| !paragraph.is_empty()) {
                                    p { (paragraph) }
                                }
                            }
                        }
                    }
                    (footer(&context.root))
                }
            }
        };
        Ok(markup)
    }

    #[instrument(level = "debug", skip_all, fields(page_id = request.page.id))]
    async fn get_response(
        &self,
        request: &PageRequest,
        context: &mut PageContext,
    ) -> poem::Result<Response> {
        context.set_page(request.page.clone());
        Ok(self.build_response(context)?)
    }
}
