#![no_main]

use libfuzzer_sys::fuzz_target;
use schooldir::directory::{ParseMode, SchoolDirectory, parse_with_report};

fuzz_target!(|data: &str| {
    // Parsing never fails; every kept record must carry a code
    for mode in [ParseMode::Lenient, ParseMode::Strict] {
        let report = parse_with_report(data, mode);
        assert!(report.records.iter().all(|r| r.has_code()));
        assert!(report.rejected(mode) <= report.issues.len());
    }

    let directory = SchoolDirectory::parse(data);
    for record in directory.records() {
        assert!(directory.find_by_exact_code(&record.udise_code).is_some());
    }
});
