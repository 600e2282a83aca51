// ==========================================
// GST Billing Core - Import Service
// ==========================================
// Responsibility: orchestrate the import flow from file to candidate
// records
// Flow: parse -> transform/group
// ==========================================

use crate::config::ImportDefaults;
use crate::domain::ProductRecord;
use crate::importer::error::ImportResult;
use crate::importer::invoice::{InvoiceImportBundle, InvoiceRowGrouper};
use crate::importer::inventory::parse_inventory_rows;
use crate::importer::UniversalFileParser;
use std::path::Path;
use tracing::{debug, info, instrument};

pub struct ImportService {
    parser: UniversalFileParser,
    defaults: ImportDefaults,
}

impl ImportService {
    pub fn new(defaults: ImportDefaults) -> Self {
        Self {
            parser: UniversalFileParser,
            defaults,
        }
    }

    pub fn defaults(&self) -> &ImportDefaults {
        &self.defaults
    }

    /// Parse an inventory sheet into candidate product records.
    ///
    /// The result is a candidate batch for staging, not yet committed
    /// anywhere.
    #[instrument(skip(self, file_path))]
    pub fn import_inventory_file<P: AsRef<Path>>(
        &self,
        file_path: P,
    ) -> ImportResult<Vec<ProductRecord>> {
        let path = file_path.as_ref();
        info!(file = %path.display(), "importing inventory sheet");

        // step 1: parse file
        debug!("step 1: parse file");
        let rows = self.parser.parse(path)?;
        info!(rows = rows.len(), "file parsed");

        // step 2: transform rows
        debug!("step 2: transform rows");
        let products = parse_inventory_rows(&rows, &self.defaults)?;
        info!(products = products.len(), "inventory sheet transformed");

        Ok(products)
    }

    /// Parse an invoice sheet into grouped invoices plus derived products.
    #[instrument(skip(self, file_path))]
    pub fn import_invoice_file<P: AsRef<Path>>(
        &self,
        file_path: P,
    ) -> ImportResult<InvoiceImportBundle> {
        let path = file_path.as_ref();
        info!(file = %path.display(), "importing invoice sheet");

        // step 1: parse file
        debug!("step 1: parse file");
        let rows = self.parser.parse(path)?;
        info!(rows = rows.len(), "file parsed");

        // step 2: group rows
        debug!("step 2: group rows");
        let bundle = InvoiceRowGrouper::new(&self.defaults).group(&rows)?;
        info!(
            invoices = bundle.invoices.len(),
            products = bundle.products.len(),
            "invoice sheet grouped"
        );

        Ok(bundle)
    }
}

impl Default for ImportService {
    fn default() -> Self {
        Self::new(ImportDefaults::default())
    }
}
