//! Static source corpora used across harnesses.
//!
//! Each fixture is a complete data file as the directory keeps it: banner
//! comments, `window.<state>Companies` blocks, mixed quoting, trailing
//! commas, and inline notes.

/// Two well-formed blocks with comments, mixed quotes, and uneven layout.
pub const SOURCE_TWO_STATES: &str = r##"// ===============================
// GOA COMPANIES
// ===============================
window.goaCompanies = [
  {
    company: 'Zuari Agro',
    state: 'Goa',
    city: 'Panaji',
    roles: ['Chemist', 'Plant Operator'],
    linkedin: "#",
    career: "https://zuari.in/careers", // verified
  },
  // more listings below
  {
    company: "cipla",
    state: "Goa",
      city: "Verna",
    sector: "Pharma",
    roles: ["QC Analyst"]
  }
];

window.keralaCompanies = [
  { company: "UST", state: "Kerala", city: "Thiruvananthapuram", roles: ["Developer"] },
  { company: "Ernst & Young", state: "Kerala", city: "Kochi", roles: ["Auditor"] },
];
"##;

/// Expected minified output for [`SOURCE_TWO_STATES`].
pub const MINIFIED_TWO_STATES: &str = concat!(
    r#"window.goaCompanies=[{"company":"cipla","state":"Goa","city":"Verna","sector":"Pharma","roles":["QC Analyst"]},"#,
    r##"{"company":"Zuari Agro","state":"Goa","city":"Panaji","roles":["Chemist","Plant Operator"],"linkedin":"#","career":"https://zuari.in/careers"}];"##,
    r#"window.keralaCompanies=[{"company":"Ernst & Young","state":"Kerala","city":"Kochi","roles":["Auditor"]},"#,
    r#"{"company":"UST","state":"Kerala","city":"Thiruvananthapuram","roles":["Developer"]}];"#,
);

/// One valid block followed by one that calls a function.
pub const SOURCE_WITH_BAD_BLOCK: &str = "\
window.goodCompanies = [ {company: \"B\"}, {company: \"A\"} ];
window.badCompanies = [ {company: doSomething()} ];
";

/// The bad block from [`SOURCE_WITH_BAD_BLOCK`], verbatim.
pub const BAD_BLOCK: &str = "window.badCompanies = [ {company: doSomething()} ];";

/// A broken block with an unterminated string, followed by a valid block
/// whose values hold a URL and a double space.
pub const SOURCE_UNBALANCED_QUOTE: &str = r#"window.brokenCompanies = [ {company: "Half} ];
window.goaCompanies = [
  { company: 'Tata  Steel', city: 'Panaji', career: 'https://tatasteel.com/careers' }, // verified
];
"#;

/// The broken block from [`SOURCE_UNBALANCED_QUOTE`], verbatim.
pub const UNBALANCED_BLOCK: &str = r#"window.brokenCompanies = [ {company: "Half} ];"#;

/// Listings that set known fields to an explicit `null`.
pub const SOURCE_WITH_NULLS: &str = r#"window.nullCompanies = [
  { company: 'Zoho', linkedin: null, sector: null },
  { company: null, city: 'Chennai' },
];
"#;

/// The layout of the live data file: `const` arrays plus `||` fallbacks,
/// none of which is a `window.<name>Companies = [ ... ];` assignment.
pub const SOURCE_WITHOUT_BLOCKS: &str = r#"// ANDHRA PRADESH COMPANIES
const andhraPradeshCompanies = [
  { company: "Wipro", state: "Andhra Pradesh", city: "Visakhapatnam" }
];
window.andhraPradeshCompanies = window.andhraPradeshCompanies || andhraPradeshCompanies;
window.karnatakaCompanies   = window.karnatakaCompanies   || [];
"#;

/// Records with awkward sort keys: accents, case, duplicates, and a
/// listing without a company name.
pub const SOURCE_AWKWARD_KEYS: &str = r#"window.mixedCompanies = [
  { company: "Zeta", city: "1" },
  { company: "Émile Labs", city: "2" },
  { city: "3" },
  { company: "apex", city: "4" },
  { company: "Apex", city: "5" },
  { company: "emile labs", city: "6" },
];"#;

/// Every fixture that should normalize without fallbacks.
pub const CLEAN_SOURCES: &[&str] = &[SOURCE_TWO_STATES, SOURCE_AWKWARD_KEYS, SOURCE_WITH_NULLS];
