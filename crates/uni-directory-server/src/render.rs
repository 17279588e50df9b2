//! Plain-text rendering for the CLI and REPL.

use std::fmt::Write;

use uni_directory::{program_preview, strip_qualifier, CountrySummary, University, VisaRisk};

/// Programs shown per row in list output.
const PREVIEW_PROGRAMS: usize = 2;

/// One line per university: rank, name, city, tuition, salary, GRE, visa.
pub fn render_table(universities: &[University]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:<4} {:<40} {:<14} {:<16} {:<16} {:<8} {:<7}",
        "#", "University", "City", "Tuition (INR)", "Salary (INR)", "GRE", "Visa"
    );

    for uni in universities {
        let p = &uni.profile;
        let _ = writeln!(
            out,
            "  {:<4} {:<40} {:<14} {:<16} {:<16} {:<8} {:<7}",
            p.rank,
            p.university_name,
            p.city,
            strip_qualifier(&p.annual_tuition_fee_inr),
            strip_qualifier(&p.avg_starting_salary_inr),
            strip_qualifier(&p.gre_required),
            VisaRisk::classify(&p.visa_risk).label(),
        );
        let programs = program_preview(&p.popular_english_programs, PREVIEW_PROGRAMS);
        if !programs.is_empty() {
            let _ = writeln!(out, "       {}", programs.join(", "));
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "  {} universities", universities.len());
    out
}

/// Full detail view of one university.
pub fn render_detail(uni: &University) -> String {
    let p = &uni.profile;
    let mut out = String::new();
    let _ = writeln!(out, "  {} (#{} in {})", p.university_name, p.rank, uni.country);
    let _ = writeln!(out, "    Slug:              {}", uni.slug);
    let _ = writeln!(out, "    City:              {}", p.city);
    let _ = writeln!(out, "    Type:              {}", p.kind);
    let _ = writeln!(out, "    Min CGPA:          {}", strip_qualifier(&p.min_cgpa));
    let _ = writeln!(out, "    IELTS:             {}", p.ielts_requirement);
    let _ = writeln!(out, "    GRE:               {}", p.gre_required);
    let _ = writeln!(out, "    Tuition (INR/yr):  {}", p.annual_tuition_fee_inr);
    let _ = writeln!(out, "    Living (INR/yr):   {}", p.estimated_annual_living_cost_inr);
    let _ = writeln!(out, "    Duration (years):  {}", p.program_duration_years);
    let _ = writeln!(out, "    Salary (INR):      {}", p.avg_starting_salary_inr);
    let _ = writeln!(out, "    Employment rate:   {}", p.employment_rate);
    let _ = writeln!(out, "    Post-study visa:   {}", p.post_study_work_visa);
    let _ = writeln!(
        out,
        "    Visa risk:         {} ({})",
        p.visa_risk,
        VisaRisk::classify(&p.visa_risk).label()
    );
    let _ = writeln!(out, "    Website:           {}", p.website);
    let _ = writeln!(out, "    Source:            {}", p.source);
    if !p.popular_english_programs.is_empty() {
        let _ = writeln!(out, "    Programs:");
        for program in &p.popular_english_programs {
            let _ = writeln!(out, "      - {program}");
        }
    }
    out
}

/// Registry listing with per-country counts.
pub fn render_countries(countries: &[CountrySummary]) -> String {
    let mut out = String::new();
    for c in countries {
        let _ = writeln!(out, "  {} {:<16} {:<12} {:>5}", c.flag, c.name, c.code, c.count);
    }
    let total: usize = countries.iter().map(|c| c.count).sum();
    let _ = writeln!(out);
    let _ = writeln!(out, "  {} universities in {} countries", total, countries.len());
    out
}
