//! The fixed desired-industry list offered to candidates. A selected label
//! biases the analysis prompt toward that industry; no label means the model
//! suggests freely.

pub const INDUSTRIES: [&str; 12] = [
    "Information Technology (IT / Software)",
    "Business / Sales",
    "Marketing / Communications / Advertising",
    "Administration / Human Resources (HR)",
    "Accounting / Auditing",
    "Finance / Banking",
    "Design / Creative / Architecture",
    "Education / Training",
    "Logistics / Import-Export",
    "Customer Service",
    "Manufacturing / Engineering",
    "Other",
];

pub fn is_known_industry(label: &str) -> bool {
    INDUSTRIES.contains(&label)
}
