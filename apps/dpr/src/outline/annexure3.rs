//! Annexure-3 of the MSE-CDP guidelines: "Format of Detailed Proposal for CFC".

use super::{Cell, Emphasis, OutlineItem, Table, TextStyle};

fn slot(text: &str, style: TextStyle) -> OutlineItem {
    OutlineItem::Slot {
        text: text.to_string(),
        style,
    }
}

fn heading(text: &str) -> OutlineItem {
    slot(text, TextStyle::Heading)
}

fn subheading(text: &str) -> OutlineItem {
    slot(text, TextStyle::SubHeading)
}

fn line(text: &str) -> OutlineItem {
    slot(text, TextStyle::Body)
}

fn text(text: &str, style: TextStyle) -> OutlineItem {
    OutlineItem::Text {
        text: text.to_string(),
        style,
    }
}

fn body(t: &str) -> OutlineItem {
    text(t, TextStyle::Body)
}

fn gap(points: f64) -> OutlineItem {
    OutlineItem::Spacer(points)
}

/// A row of `serial | label | blanks...`.
fn numbered(serial: &str, label: &str, blanks: usize) -> Vec<Cell> {
    let mut row = vec![Cell::fixed(serial), Cell::label(label)];
    row.extend(std::iter::repeat(Cell::Empty).take(blanks));
    row
}

/// A row of `label | blanks...`.
fn labelled(label: &str, blanks: usize) -> Vec<Cell> {
    let mut row = vec![Cell::label(label)];
    row.extend(std::iter::repeat(Cell::Empty).take(blanks));
    row
}

fn blank_row(serial: &str, blanks: usize) -> Vec<Cell> {
    let mut row = vec![Cell::fixed(serial)];
    row.extend(std::iter::repeat(Cell::Empty).take(blanks));
    row
}

/// The full Annexure-3 outline, sections 1 to 21.
pub fn annexure3() -> Vec<OutlineItem> {
    let mut items = vec![
        text("New Guidelines MSE-CDP Page 18 of 44", TextStyle::PageHeader),
        gap(4.0),
        text("Annexure-3", TextStyle::Title),
        text("Format of Detailed Proposal for CFC", TextStyle::Title),
        gap(4.0),
        heading("1. Proposal under consideration"),
        gap(2.0),
        heading("2. Brief particulars of the proposal"),
        gap(2.0),
        OutlineItem::Table(section2_table()),
        gap(3.0),
        subheading("2.1. Introduction: brief about"),
        line("2.1.1. General scenario of industrial growth/ cluster development in the state"),
        line("2.1.2. Sector for which CFC is proposed to be set up"),
        line("2.1.3. Cluster and its products, future prospects of products, Competition scenario, Backward and forward linkages"),
        line("Basic data of cluster (Number of units, type of units [Micro/Small/Medium], employment [direct /indirect], turnover, exports, etc):"),
        line("2.1.4. How the proposed CFC is relevant to the growth of the concerned cluster/ sector"),
        gap(4.0),
        heading("3. Information about SPV"),
        gap(2.0),
        OutlineItem::Table(spv_table()),
        gap(4.0),
        OutlineItem::Table(spv_table_continued()),
        gap(4.0),
    ];

    items.extend(promoters_section());
    items.extend(eligibility_section());
    items.extend(implementation_section());
    items.extend(technical_section());
    items.extend(schedule_section());
    items.extend(components_section());
    items.extend(viability_section());
    items.extend(closing_sections());
    items
}

fn section2_table() -> Table {
    Table::new(&[2.3, 4.5], 8.5, Emphasis::FirstColumn)
        .row(vec![
            Cell::label("Name of applicant, contact details, etc"),
            Cell::placeholder(
                "As CFC Registered address / administrative address may be different from CFC facilities address, the same may be provided",
            ),
        ])
        .row(vec![
            Cell::label("Location of Common Facility Centre"),
            Cell::placeholder("Address where facilities are proposed may be provided"),
        ])
        .row(vec![
            Cell::label("Main facilities being proposed"),
            Cell::placeholder("Details of facilities to be provided"),
        ])
}

fn spv_table() -> Table {
    Table::new(&[0.5, 2.8, 3.5], 8.5, Emphasis::FirstRow)
        .header(&["S. No.", "Description", "Details/ Compliance"])
        .row(vec![Cell::fixed("(i)"), Cell::fixed("Name and address"), Cell::Applicant])
        .row(numbered(
            "(ii)",
            "Registration details of SPV (including registration as Section 8 company under the Companies Act 2013)",
            1,
        ))
        .row(numbered("(iii)", "Names of the State Govt and MSME officials in SPV", 1))
        .row(numbered("(iv)", "Date of formation of the company", 1))
        .row(numbered("(v)", "Date of commencement of business", 1))
        .row(numbered("(vi)", "Number of MSE Member Units", 1))
        .row(numbered("(vii)", "Bye laws or MoA and AoA submitted", 1))
        .row(numbered("(viii)", "Main objectives of the SPV", 1))
        .row(numbered(
            "(ix)",
            "SPV to have a character of inclusiveness wherein provision for enrolling new members to enable prospective entrepreneurs in the cluster to utilise the facility",
            1,
        ))
        .row(numbered(
            "(x)",
            "Clause about 'Profits/surplus to be ploughed back to CFC' included or not",
            1,
        ))
        .row(numbered("(xi)", "Authorized share capital", 1))
        .row(numbered("(xii)", "Shareholding Pattern (Annexure-3 to be filled in)", 1))
}

fn spv_table_continued() -> Table {
    Table::new(&[0.5, 2.8, 3.5], 8.5, Emphasis::FirstRow)
        .row(numbered("(xiii)", "Commitment letter for SPV Upfront contribution", 1))
        .row(numbered("(xiv)", "Project specific A/c in schedule A bank", 1))
        .row(numbered(
            "(xv)",
            "Clause about 'CFC may be utilised by SPV members as also others in a cluster and Evidence for SPV members' ability to utilise at least 60% of installed capacity'",
            1,
        ))
        .row(numbered("(xvi)", "Main Role of SPV", 1))
        .row(numbered("(xvii)", "Trust building of SPV so that CFC may be successful", 1))
}

fn promoters_section() -> Vec<OutlineItem> {
    let promoters = [
        "Name of the Office bearers of the SPV",
        "Age (years)",
        "Educational Qualification",
        "Relationship with the chief promoter",
        "Experience in what capacity/ industry/ years",
        "Income Tax / Wealth Tax Status (returns for 3 years to be furnished)",
        "Other concerns interest / in which capacity /financial stake",
    ]
    .into_iter()
    .fold(
        Table::new(&[1.2, 0.4, 0.8, 0.8, 1.0, 1.1, 0.6, 0.5], 7.0, Emphasis::FirstRow),
        |table, label| table.row(labelled(label, 7)),
    );

    vec![
        heading("4. Details of Project Promoters /Sponsors"),
        line("(i) Brief bio-data of Promoters"),
        line("(ii) The details of the promoters are as under:"),
        gap(2.0),
        OutlineItem::Table(promoters),
        gap(4.0),
        line("(i) Brief about Compliance with KYC guidelines"),
        line("(ii) Details of connected lending - Whether the directors / promoters of SPV are having any directorship on any bank etc."),
        line("(iii) Adverse auditors remarks, if any to be culled out from audit report, in case available. If SPV is new, it can be indicated as not applicable"),
        line("(iv) Particulars of previous assistance from financial institutions / banks - If SPV is new, it can be indicated as not applicable"),
        line("(v) Pending court cases initiated by other banks/FIs, if any - If SPV is new, it can be indicated as not applicable"),
        line("(vi) Management Set-up"),
        line("(vii) To indicate details regarding who will be the main persons involved in running of CFC, its operations etc."),
        gap(4.0),
    ]
}

const ELIGIBILITY_CRITERIA: [&str; 9] = [
    "The GoI grant will be restricted to 60% / 70% / 80% of the cost of Project of maximum Rs.30.00 crore as per the Scheme guidelines.",
    "Cost of project includes cost of Land (subject to max. of 25% of Project Cost), building, pre-operative expenses, preliminary expenses, machinery & equipment, miscellaneous fixed assets, support infrastructure such as water supply, electricity and margin money for working capital.",
    "The entire cost of land and building for CFC shall be met by SPV/State Government concerned.",
    "In case existing land and building is provided by stakeholders, the cost of land and building will be decided on the basis of valuation report prepared by an approved agency of Central/State Govt. Departments/FIs/Public Sector Banks. Cost of land and building may be taken towards contribution for the project.",
    "CFC can be set up in leased premises. However, the lease should be legally tenable and for a fairly long duration (say 15 years).",
    "Escalation in the cost of project above the sanctioned amount, due to any reason, will be borne by the SPV/ State Government. The Central Government shall not accept any financial liability arising out of operation of any CFC.",
    "DPR should be appraised by a bank (if bank financing is involved) / independent Technical Consultancy Organization/ SIDBI.",
    "Proposals approved and forwarded by the concerned state government.",
    "Evidence should be furnished with regard to SPV members ability to utilize at least 60% of installed capacity.",
];

fn eligibility_section() -> Vec<OutlineItem> {
    let table = ELIGIBILITY_CRITERIA.iter().enumerate().fold(
        Table::new(&[0.4, 5.5, 0.9], 8.5, Emphasis::FirstRow).header(&[
            "S. No.",
            "Eligibility Criteria",
            "Comments",
        ]),
        |table, (i, criterion)| {
            table.row(vec![
                Cell::Fixed(format!("{}.", i + 1)),
                Cell::fixed(criterion),
                Cell::Empty,
            ])
        },
    );

    vec![
        heading("5. Eligibility as per guidelines of MSE-CDP"),
        gap(2.0),
        OutlineItem::Table(table),
        gap(4.0),
    ]
}

fn implementation_section() -> Vec<OutlineItem> {
    let table = Table::new(&[4.6, 2.2], 8.5, Emphasis::FirstRow)
        .header(&["Description", "Compliance"])
        .row(labelled("a. Name of Implementation Agency", 1))
        .row(labelled(
            "b. Role of Implementing Agency (e.g. implementation and monitoring of project, sending regular progress reports, issuing proper UCs, )",
            1,
        ))
        .row(labelled("c. Implementation Period", 1))
        .row(labelled("d. Commitment of State Government upfront contribution", 1))
        .row(labelled("e. Commitment of Loans (Working capital and/ or term loan)", 1));

    vec![
        heading("6. Implementing Arrangements"),
        gap(2.0),
        OutlineItem::Table(table),
        gap(4.0),
        heading("7. Management and shareholding details:"),
        gap(4.0),
    ]
}

fn technical_section() -> Vec<OutlineItem> {
    let manpower = (1..=4).fold(
        Table::new(&[0.7, 4.3, 1.8], 8.5, Emphasis::FirstRow).header(&[
            "S. No.",
            "Description of the employee",
            "Number",
        ]),
        |table, n| table.row(blank_row(&n.to_string(), 2)),
    );

    vec![
        heading("8. Technical Aspects:"),
        line("(i) Scope of the project (including components/ sections of CFC)"),
        line("(ii) Locational details and availability of infrastructural facilities"),
        line("(iii) Technology"),
        line("(iv) Provision for Industry 4.0 of AI and innovations if any"),
        line("(v) Raw materials / components"),
        line("(vi) Utilities"),
        line("(a) Power"),
        line("(b) Water"),
        line("(vii) Effluent disposal"),
        line("(viii) Manpower"),
        line("The details of the manpower are as under:"),
        gap(2.0),
        OutlineItem::Table(manpower),
        gap(4.0),
    ]
}

fn schedule_section() -> Vec<OutlineItem> {
    let schedule = [
        "Preparation of Project Report",
        "Sanction of Grant from Government of India",
        "NOC from Pollution Control Board",
        "Site Development",
        "Building up-keep",
        "Placement of order to equipment supplier",
        "Supply of equipments by suppliers",
        "Installation of equipments at site",
        "Sanction of power connection",
        "Trial Run",
        "Commercial Production",
    ]
    .into_iter()
    .fold(
        Table::new(&[3.2, 1.8, 1.8], 8.5, Emphasis::FirstRow).header(&[
            "Activities",
            "Start Date",
            "Completion Date",
        ]),
        |table, activity| table.row(labelled(activity, 2)),
    );

    vec![
        heading("9. Implementation Schedule:"),
        gap(2.0),
        OutlineItem::Table(schedule),
        gap(3.0),
        body("Note: PERT Chart for all activities to be accomplished in accordance with activity-wise time line as prescribed in MSE-CDP guidelines will mandatory be a part of DPR."),
        gap(4.0),
    ]
}

fn components_section() -> Vec<OutlineItem> {
    let cost = Table::new(&[0.7, 4.3, 1.8], 8.5, Emphasis::FirstAndLastRow)
        .header(&["S. No.", "Particulars", "Amount"])
        .row(numbered("1", "Land and Building", 1))
        .row(numbered(
            "2",
            "Plant & Machinery including MFA, Installation, Taxes/duties, Contingencies, etc.",
            1,
        ))
        .row(numbered("3", "Preliminary & Pre-operative expenses", 1))
        .row(numbered("4", "Margin money for Working Capital", 1))
        .row(numbered("", "Total", 1));

    let machinery = (1..=4).fold(
        Table::new(&[0.7, 3.4, 1.0, 1.7], 8.5, Emphasis::FirstRow).header(&[
            "S. No.",
            "Description",
            "No.",
            "Amount",
        ]),
        |table, n| table.row(blank_row(&n.to_string(), 3)),
    );

    let financing = Table::new(&[0.7, 3.2, 1.2, 1.7], 8.5, Emphasis::FirstAndLastRow)
        .header(&["S. No.", "Particulars", "Percentage", "Amount"])
        .row(blank_row("", 3))
        .row(numbered("", "Total", 2));

    vec![
        heading("10. Project components:"),
        subheading("(i) Estimated Project Cost (Rs. in lakh):"),
        gap(2.0),
        OutlineItem::Table(cost),
        gap(3.0),
        line("(ii) Details of Land, Site Development and Building & Civil Work"),
        gap(2.0),
        line("(iii) Plant & Machinery:"),
        body("(Rs. in lakh)"),
        gap(2.0),
        OutlineItem::Table(machinery),
        gap(3.0),
        line("(iv) Comments on Plant and Machineries from O/o DC, MSME:"),
        line("(v) Misc. fixed assets"),
        line("(vi) Preliminary expenses"),
        line("(vii) Pre-operative expenses"),
        line("(viii) Contingency Provisions:"),
        line("(ix) Margin money for Working Capital"),
        gap(2.0),
        line("(x) Proposed Means of Financing:"),
        body("(Rs. in lakh)"),
        gap(2.0),
        OutlineItem::Table(financing),
        gap(3.0),
        line("(xi) SPV contribution:"),
        line("(xii) Grant-in-aid from Govt. of India under MSE-CDP"),
        line("(xiii) Grant-in-aid from the State Government"),
        line("(xiv) Bank Loan/ others"),
        line("(xv) Arrangements for utilization of facilities by cluster units:"),
        gap(4.0),
    ]
}

fn viability_section() -> Vec<OutlineItem> {
    let financial = [
        "Net Block",
        "Current Assets (incl. cash/bank balance)",
        "Current Liabilities (incl. principal installment falling due during the year)",
        "Long term borrowings",
        "Capital",
        "Reserves and Surplus",
        "Unsecured loan",
        "Net Worth (incl. GoI Subsidy as Quasi-equity)",
        "Income",
        "Gross profit",
        "Depreciation",
        "Profit after tax",
        "Gross Cash Accruals",
    ]
    .into_iter()
    .enumerate()
    .fold(
        Table::new(&[0.4, 2.4, 0.7, 0.7, 0.7, 0.7, 0.7], 7.5, Emphasis::FirstRow).header(&[
            "S. No.",
            "Particulars",
            "FY 1",
            "FY 2",
            "FY3",
            "FY4",
            "FY5",
        ]),
        |table, (i, label)| table.row(numbered(&(i + 1).to_string(), label, 5)),
    );

    let performance = [
        "Units (including details of SC/ST/Women /Minorities)",
        "Employment",
        "Production",
        "Exports",
        "Import Substitution",
        "Number of patent expected aimed",
        "Investment",
        "Turnover",
        "Profit",
        "Quality Certification",
        "Any others (No. of ZED certified units)",
    ]
    .into_iter()
    .fold(
        Table::new(&[2.3, 2.3, 2.3], 8.5, Emphasis::FirstRow).header(&[
            "Particulars",
            "Before Intervention Qty. / Outcome",
            "After Intervention Qty. / Outcome",
        ]),
        |table, label| table.row(labelled(label, 2)),
    );

    vec![
        heading("11. Fund requirement / availability analysis: The details must be provided keeping in view that pace of the project is not suffered due to non-availability of funds in time."),
        gap(4.0),
        heading("12. Usage Charges:"),
        gap(4.0),
        heading("13. Comments on Commercial viability:"),
        gap(4.0),
        heading("14. Financial Economic viability:"),
        body("Assumptions underlying the profitability estimates, projected cash flow statements and projected balance sheet are placed at Annexure and the summary of key parameters for the first 5 years are given below:-"),
        body("(Rs. in lakh)"),
        gap(2.0),
        OutlineItem::Table(financial),
        gap(3.0),
        line("The projected revenue of SPV is based upon the following major assumptions:"),
        gap(4.0),
        heading("15. Projected performance of the cluster after proposed intervention (in terms of production, domestic sales / exports and direct, indirect employment, etc.)"),
        gap(2.0),
        OutlineItem::Table(performance),
        gap(4.0),
    ]
}

fn closing_sections() -> Vec<OutlineItem> {
    vec![
        heading("16. Status of Government approvals"),
        line("(i) Pollution control"),
        line("(ii) Permission for land use (conversion for industrial purpose)"),
        gap(4.0),
        heading("17. Favorable and Risk Factors of the project : SWOT Analysis"),
        gap(4.0),
        heading("18. Risk Mitigation Framework"),
        body("Key risks during the implementation and operations phase of the Project and the mitigations measures thereof could be as below:"),
        gap(3.0),
        line("During implementation:"),
        gap(3.0),
        line("During operations:"),
        gap(4.0),
        heading("19. Economics of the project"),
        line("(a) Debt Service coverage ratio (Projections for 10 years)"),
        gap(2.0),
        text(
            "DSCR = (Net Profit + Interest(TL) + Depreciation) / (installment(TL) + Interest(TL))",
            TextStyle::Centered,
        ),
        gap(3.0),
        line("(b) Balance sheet & P/L account (projection for 10 years)"),
        gap(3.0),
        body("(c) Break Even Point = Fixed Cost / Contribution on Sales (Sales - Variable Cost)"),
        gap(4.0),
        heading("20. Commercial Viability: Following financial appraisal tools will be employed for assessing commercial viability of the Project:"),
        gap(2.0),
        line("(i) Return on Capital Employed (ROCE):"),
        body("The total return generated by the project over its entire projected life will be averaged to find out the average yearly return. The simple acceptance rule for the investment is that the return (incorporating benefit of grant-in-aid assistance) is sufficiently larger than the interest on capital employed. Return in excess of 25% is desirable."),
        gap(2.0),
        line("(ii) Debt Service Coverage Ratio:"),
        body("Acceptance rule will be cumulative DSCR of 3:1 during repayment period."),
        gap(2.0),
        line("(iii) Break-Even (BE) Analysis:"),
        body("Break-even point should be below 60 per cent of the installed capacity."),
        gap(2.0),
        line("(iv) Sensitivity Analysis:"),
        body("Sensitivity analysis will be pursued for all the major financial parameters/indicators in terms of a 5-10 per cent drop in user charges or fall in capacity utilisation by 10-20 per cent."),
        gap(2.0),
        line("(v) Net Present Value (NPV):"),
        body("Net Present Value of the Project needs to be positive and the Internal Rate of return (IRR) should be above 10 per cent. The rate of discount to be adopted for estimation of NPV will be 10 per cent. The Project life may be considered to be a maximum of 10 years. The life of the Project to be considered for this purpose needs to be supported by recommendation of a technical expert/institution."),
        gap(4.0),
        heading("21. Conclusion"),
        gap(6.0),
        text("*****", TextStyle::Centered),
    ]
}
