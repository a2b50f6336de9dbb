use crate::core::{LoadOutcome, MalformedLinePolicy, StockRecord, Storage, HEADERS};
use crate::utils::error::{Result, StockError};
use crate::utils::validation::parse_integer;
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, Trim, WriterBuilder};

/// The authoritative, ordered list of records and its backing file.
///
/// Fields are neither quoted nor escaped on disk, so a value containing a
/// comma will not survive a save/load cycle.
pub struct Store<S: Storage> {
    storage: S,
    records: Vec<StockRecord>,
    policy: MalformedLinePolicy,
}

impl<S: Storage> Store<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            records: Vec::new(),
            policy: MalformedLinePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: MalformedLinePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn records(&self) -> &[StockRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends every record in the backing file to the in-memory list.
    ///
    /// The header line is skipped. Records already in memory are kept, so
    /// loading twice duplicates them. A missing file is not an error and
    /// yields [`LoadOutcome::MissingFile`].
    pub fn load(&mut self) -> Result<LoadOutcome> {
        let content = match self.storage.read_to_string() {
            Ok(content) => content,
            Err(StockError::NotFound { path }) => {
                tracing::warn!("Backing file {} not found, starting with no records", path);
                return Ok(LoadOutcome::MissingFile);
            }
            Err(e) => return Err(e),
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .from_reader(content.as_bytes());

        let mut loaded = 0;
        let mut skipped = Vec::new();

        for row in reader.records() {
            let row = row?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();

            if is_blank(&row) {
                continue;
            }

            match parse_row(&row, line) {
                Ok(record) => {
                    self.records.push(record);
                    loaded += 1;
                }
                Err(e) => match self.policy {
                    MalformedLinePolicy::Abort => {
                        tracing::warn!("Aborting load after {} records: {}", loaded, e);
                        return Err(e);
                    }
                    MalformedLinePolicy::Skip => {
                        tracing::warn!("Skipping {}", e);
                        skipped.push(line);
                    }
                },
            }
        }

        tracing::debug!(
            "Loaded {} records from {} ({} skipped)",
            loaded,
            self.storage.location(),
            skipped.len()
        );

        Ok(LoadOutcome::Loaded {
            records: loaded,
            skipped,
        })
    }

    /// Truncates the backing file and rewrites the header plus every record.
    pub fn save_all(&self) -> Result<()> {
        let data = encode(&self.records, true)?;
        self.storage.write_all(&data)?;
        tracing::debug!(
            "Saved {} records to {}",
            self.records.len(),
            self.storage.location()
        );
        Ok(())
    }

    /// Appends a single record line.
    ///
    /// A missing or blank file is rewritten with the header first, and a
    /// last line without a terminator is closed before the record is added.
    pub fn append_one(&self, record: &StockRecord) -> Result<()> {
        let existing = match self.storage.read_to_string() {
            Ok(content) => Some(content),
            Err(StockError::NotFound { .. }) => None,
            Err(e) => return Err(e),
        };

        match existing {
            Some(content) if !content.trim().is_empty() => {
                let mut data = Vec::new();
                if !content.ends_with('\n') {
                    data.push(b'\n');
                }
                data.extend(encode(std::slice::from_ref(record), false)?);
                self.storage.append(&data)?;
            }
            _ => {
                let data = encode(std::slice::from_ref(record), true)?;
                self.storage.write_all(&data)?;
            }
        }

        tracing::debug!("Appended {} to {}", record.code, self.storage.location());
        Ok(())
    }

    pub(crate) fn push(&mut self, record: StockRecord) {
        self.records.push(record);
    }

    pub(crate) fn record_mut(&mut self, index: usize) -> Option<&mut StockRecord> {
        self.records.get_mut(index)
    }
}

fn is_blank(row: &StringRecord) -> bool {
    row.len() == 1 && row[0].is_empty()
}

fn parse_row(row: &StringRecord, line: u64) -> Result<StockRecord> {
    if row.len() != HEADERS.len() {
        return Err(StockError::FormatError {
            line,
            reason: format!("expected {} fields, found {}", HEADERS.len(), row.len()),
        });
    }

    let to_format_error = |e: StockError| StockError::FormatError {
        line,
        reason: e.to_string(),
    };
    let cost = parse_integer("cost", &row[3]).map_err(to_format_error)?;
    let quantity = parse_integer("quantity", &row[4]).map_err(to_format_error)?;

    Ok(StockRecord::new(&row[0], &row[1], &row[2], cost, quantity))
}

fn encode(records: &[StockRecord], with_header: bool) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    if with_header {
        writer.write_record(HEADERS)?;
    }
    for record in records {
        writer.write_record(record.fields())?;
    }

    writer
        .into_inner()
        .map_err(|e| StockError::IoError(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mock::MockStorage;

    const SAMPLE: &str = "Country,Code,Product,Cost,Quantity
South Africa,SKU44386,Air Max 90,2300,20
China , SKU90000 , Jordan 1 , 3200 , 50

Vietnam,SKU63221,Blazer,1700,19
";

    #[test]
    fn test_load_skips_header_and_trims_fields() {
        let mut store = Store::new(MockStorage::with_contents(SAMPLE));

        let outcome = store.load().unwrap();

        assert_eq!(
            outcome,
            LoadOutcome::Loaded {
                records: 3,
                skipped: vec![]
            }
        );
        assert_eq!(store.records()[0].code, "SKU44386");
        assert_eq!(
            store.records()[1],
            StockRecord::new("China", "SKU90000", "Jordan 1", 3200, 50)
        );
        assert_eq!(store.records()[2].quantity, 19);
    }

    #[test]
    fn test_missing_file_yields_empty_store() {
        let mut store = Store::new(MockStorage::new());

        assert_eq!(store.load().unwrap(), LoadOutcome::MissingFile);
        assert!(store.is_empty());
    }

    #[test]
    fn test_repeated_load_appends_duplicates() {
        let mut store = Store::new(MockStorage::with_contents(SAMPLE));

        store.load().unwrap();
        store.load().unwrap();

        assert_eq!(store.len(), 6);
        assert_eq!(store.records()[0], store.records()[3]);
    }

    #[test]
    fn test_short_line_aborts_and_keeps_earlier_records() {
        let contents = "Country,Code,Product,Cost,Quantity
France,SKU1,Cortez,100,5
Spain,SKU2,Dunk,200
Italy,SKU3,Vomero,300,7
";
        let mut store = Store::new(MockStorage::with_contents(contents));

        match store.load() {
            Err(StockError::FormatError { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected FormatError, got {:?}", other),
        }
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].code, "SKU1");
    }

    #[test]
    fn test_skip_policy_continues_past_bad_lines() {
        let contents = "Country,Code,Product,Cost,Quantity
France,SKU1,Cortez,100,5
Spain,SKU2,Dunk,200
Peru,SKU4,Waffle,abc,1
Italy,SKU3,Vomero,300,7
";
        let mut store = Store::new(MockStorage::with_contents(contents))
            .with_policy(MalformedLinePolicy::Skip);

        let outcome = store.load().unwrap();

        assert_eq!(
            outcome,
            LoadOutcome::Loaded {
                records: 2,
                skipped: vec![3, 4]
            }
        );
        assert_eq!(store.records()[1].code, "SKU3");
    }

    #[test]
    fn test_save_all_writes_header_and_records_in_order() {
        let mut store = Store::new(MockStorage::with_contents(SAMPLE));
        store.load().unwrap();

        store.save_all().unwrap();

        assert_eq!(
            store.storage().contents().unwrap(),
            "Country,Code,Product,Cost,Quantity
South Africa,SKU44386,Air Max 90,2300,20
China,SKU90000,Jordan 1,3200,50
Vietnam,SKU63221,Blazer,1700,19
"
        );
    }

    #[test]
    fn test_append_one_adds_header_to_missing_file() {
        let store = Store::new(MockStorage::new());

        store
            .append_one(&StockRecord::new("UK", "SKU7", "Air Force 1", 900, 3))
            .unwrap();
        store
            .append_one(&StockRecord::new("USA", "SKU8", "Killshot", 800, 4))
            .unwrap();

        assert_eq!(
            store.storage().contents().unwrap(),
            "Country,Code,Product,Cost,Quantity\nUK,SKU7,Air Force 1,900,3\nUSA,SKU8,Killshot,800,4\n"
        );
    }

    #[test]
    fn test_append_one_writes_header_to_blank_file() {
        let store = Store::new(MockStorage::with_contents(" \n"));

        store
            .append_one(&StockRecord::new("UK", "SKU7", "Air Force 1", 900, 3))
            .unwrap();

        assert_eq!(
            store.storage().contents().unwrap(),
            "Country,Code,Product,Cost,Quantity\nUK,SKU7,Air Force 1,900,3\n"
        );
    }

    #[test]
    fn test_append_one_terminates_unfinished_last_line() {
        let store = Store::new(MockStorage::with_contents(
            "Country,Code,Product,Cost,Quantity\nFrance,SKU1,Cortez,100,20",
        ));

        store
            .append_one(&StockRecord::new("UK", "SKU7", "Air Force 1", 900, 3))
            .unwrap();

        assert_eq!(
            store.storage().contents().unwrap(),
            "Country,Code,Product,Cost,Quantity\nFrance,SKU1,Cortez,100,20\nUK,SKU7,Air Force 1,900,3\n"
        );
    }

    #[test]
    fn test_append_one_reports_write_error() {
        let storage = MockStorage::with_contents("Country,Code,Product,Cost,Quantity\n");
        storage.set_fail_writes(true);
        let store = Store::new(storage);

        let result = store.append_one(&StockRecord::new("UK", "SKU7", "Air Force 1", 900, 3));

        assert!(matches!(result, Err(StockError::WriteError { .. })));
    }
}
