//! Offline rendering of gone pages, for checking the page setup without a web server.

use tokio::io::{stdout, AsyncWrite};

use crate::database;
use crate::gone::RequestPath;
use crate::opts::GenerateOpts;
use crate::pages::{FindOptions, PageType};
use crate::prelude::*;
use crate::web::render::{PageContext, PageRequest};
use crate::web::site::Site;

pub async fn run(opts: GenerateOpts) -> Result {
    let repository = database::open(opts.repository).await?;
    let site = Site::new(repository, opts.site);
    generate(&site, &opts.host, &opts.path, &mut stdout()).await
}

#[instrument(level = "info", skip(site, writer))]
async fn generate<W: AsyncWrite + Unpin + Send>(
    site: &Site,
    host: &str,
    path: &str,
    writer: &mut W,
) -> Result {
    let path = RequestPath::parse(path, &site.opts.script_name);
    let (root, page) = site
        .locate(host, &path, FindOptions::default())
        .await?
        .ok_or_else(|| anyhow!("`{}` is not found", path.request))?;
    if page.type_ != PageType::Error410 {
        return Err(anyhow!("`{}` is a {} page", path.request, page.type_.to_str()));
    }
    let request = PageRequest {
        uri: format!("/{}{}", path.request, path.query_suffix()),
        page,
        path,
        preview: false,
    };
    site.gone_page
        .generate(&request, &mut PageContext::new(root), writer)
        .await?;
    Ok(())
}
