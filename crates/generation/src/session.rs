//! Studio session: the loaded catalog, the selected product, and the ad
//! currently shown for it.

use adforge_catalog::{find_product, parse_catalog, CatalogFilter, Product};
use adforge_common::error::{AdforgeError, AdforgeResult};

use crate::ad::GeneratedAd;

/// Identifies the selection a generation attempt was started for.
///
/// Results are only accepted for the ticket matching the current selection,
/// so a slow response for a previously selected product is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTicket {
    handle: String,
    epoch: u64,
}

impl GenerationTicket {
    pub fn handle(&self) -> &str {
        &self.handle
    }
}

/// Single-owner session state.
#[derive(Debug, Default)]
pub struct StudioSession {
    products: Vec<Product>,
    filter: CatalogFilter,
    selected: Option<String>,
    current_ad: Option<GeneratedAd>,
    epoch: u64,
}

impl StudioSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the catalog. Clears the selection and the current ad.
    pub fn load_catalog(&mut self, products: Vec<Product>) {
        tracing::info!(products = products.len(), "Catalog loaded into session");
        self.products = products;
        self.filter = CatalogFilter::default();
        self.clear_selection();
    }

    /// Parse `raw` and load it. On a parse error the catalog is cleared and
    /// the error returned.
    pub fn load_catalog_text(&mut self, raw: &str) -> AdforgeResult<usize> {
        match parse_catalog(raw) {
            Ok(products) => {
                let count = products.len();
                self.load_catalog(products);
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Catalog rejected; clearing session");
                self.load_catalog(Vec::new());
                Err(e)
            }
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn filter(&self) -> &CatalogFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: CatalogFilter) {
        self.filter = filter;
    }

    /// Products passing the current filter, in catalog order.
    pub fn visible_products(&self) -> Vec<&Product> {
        self.filter.apply(&self.products)
    }

    /// Select a product by handle. Any shown ad belongs to the previous
    /// selection and is cleared.
    pub fn select(&mut self, handle: &str) -> AdforgeResult<&Product> {
        let index = self
            .products
            .iter()
            .position(|p| p.handle == handle)
            .ok_or_else(|| AdforgeError::catalog(format!("no product with handle {handle:?}")))?;
        self.epoch += 1;
        self.selected = Some(handle.to_string());
        self.current_ad = None;
        tracing::debug!(handle, epoch = self.epoch, "Product selected");
        Ok(&self.products[index])
    }

    pub fn clear_selection(&mut self) {
        self.epoch += 1;
        self.selected = None;
        self.current_ad = None;
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.selected
            .as_deref()
            .and_then(|handle| find_product(&self.products, handle))
    }

    pub fn current_ad(&self) -> Option<&GeneratedAd> {
        self.current_ad.as_ref()
    }

    /// Start a generation attempt for the selected product.
    pub fn begin_generation(&self) -> AdforgeResult<GenerationTicket> {
        let handle = self
            .selected
            .clone()
            .ok_or_else(|| AdforgeError::generation("no product selected"))?;
        Ok(GenerationTicket {
            handle,
            epoch: self.epoch,
        })
    }

    /// Accept `ad` if `ticket` still matches the current selection and the
    /// ad belongs to that product. The previous ad is replaced wholesale.
    pub fn commit_ad(&mut self, ticket: &GenerationTicket, ad: GeneratedAd) -> AdforgeResult<&GeneratedAd> {
        let current = ticket.epoch == self.epoch
            && self.selected.as_deref() == Some(ticket.handle.as_str())
            && ad.product_handle == ticket.handle;
        if !current {
            tracing::warn!(
                handle = %ticket.handle,
                ticket_epoch = ticket.epoch,
                epoch = self.epoch,
                "Dropping stale generation result"
            );
            return Err(AdforgeError::StaleResult {
                handle: ticket.handle.clone(),
            });
        }
        Ok(&*self.current_ad.insert(ad))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adforge_common::error::ErrorKind;

    const CSV: &str = "Handle,Title,Vendor,Published,Image Src\n\
        air-runner,Air Runner,Nike,true,a.jpg\n\
        court-classic,Court Classic,Adidas,true,c.jpg\n";

    fn session() -> StudioSession {
        let mut session = StudioSession::new();
        assert_eq!(session.load_catalog_text(CSV).unwrap(), 2);
        session
    }

    fn ad_for(session: &StudioSession, handle: &str) -> GeneratedAd {
        let product = find_product(session.products(), handle).unwrap();
        GeneratedAd::new(product, "data:image/jpeg;base64,AA==".into(), "Go.".into(), vec![])
    }

    #[test]
    fn test_commit_for_current_selection() {
        let mut s = session();
        s.select("air-runner").unwrap();
        let ticket = s.begin_generation().unwrap();
        let ad = ad_for(&s, "air-runner");
        s.commit_ad(&ticket, ad).unwrap();
        assert_eq!(s.current_ad().unwrap().product_handle, "air-runner");
    }

    #[test]
    fn test_stale_ticket_after_reselect() {
        let mut s = session();
        s.select("air-runner").unwrap();
        let ticket = s.begin_generation().unwrap();
        s.select("court-classic").unwrap();

        let ad = ad_for(&s, "air-runner");
        let err = s.commit_ad(&ticket, ad).unwrap_err();
        assert!(matches!(err, AdforgeError::StaleResult { ref handle } if handle == "air-runner"));
        assert!(s.current_ad().is_none());
    }

    #[test]
    fn test_reselecting_same_product_invalidates_ticket() {
        let mut s = session();
        s.select("air-runner").unwrap();
        let ticket = s.begin_generation().unwrap();
        s.select("air-runner").unwrap();
        let ad = ad_for(&s, "air-runner");
        assert!(s.commit_ad(&ticket, ad).is_err());
    }

    #[test]
    fn test_selection_clears_ad() {
        let mut s = session();
        s.select("air-runner").unwrap();
        let ticket = s.begin_generation().unwrap();
        let ad = ad_for(&s, "air-runner");
        s.commit_ad(&ticket, ad).unwrap();

        s.select("court-classic").unwrap();
        assert!(s.current_ad().is_none());
        assert_eq!(s.selected_product().unwrap().title, "Court Classic");
    }

    #[test]
    fn test_generation_requires_selection() {
        let s = session();
        assert_eq!(s.begin_generation().unwrap_err().kind(), ErrorKind::Generation);
    }

    #[test]
    fn test_unknown_handle() {
        let mut s = session();
        assert!(s.select("nope").is_err());
        assert!(s.selected_product().is_none());
    }

    #[test]
    fn test_bad_catalog_clears_session() {
        let mut s = session();
        s.select("air-runner").unwrap();
        let err = s.load_catalog_text("Title,Vendor\nx,y\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CatalogParse);
        assert!(s.products().is_empty());
        assert!(s.selected_product().is_none());
    }

    #[test]
    fn test_filter_narrows_visible_products() {
        let mut s = session();
        s.set_filter(CatalogFilter::new(Some("Adidas".into()), None));
        let visible = s.visible_products();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].handle, "court-classic");
    }
}
