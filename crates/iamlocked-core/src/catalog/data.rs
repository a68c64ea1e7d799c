//! Built-in syllabus trees.

use crate::syllabus::{Paper, Subject, Topic};

fn paper(id: &str, name: &str, subjects: Vec<Subject>) -> Paper {
    Paper::new(id, name, subjects)
}

fn subject(id: &str, name: &str, topics: &[(&str, &str, f64)]) -> Subject {
    Subject::new(
        id,
        name,
        topics
            .iter()
            .map(|(id, name, hours)| Topic::new(*id, *name).with_hours(*hours))
            .collect(),
    )
}

pub(super) fn upsc() -> Vec<Paper> {
    vec![
        paper(
            "prelims",
            "UPSC Prelims",
            vec![
                subject(
                    "prelims-gs",
                    "Paper I: General Studies (GS)",
                    &[
                        (
                            "prelims-gs-current-events",
                            "Current Events of National & International Importance",
                            100.0,
                        ),
                        ("prelims-gs-history", "History of India & Indian National Movement", 80.0),
                        ("prelims-gs-geography", "Indian & World Geography", 70.0),
                        ("prelims-gs-polity", "Indian Polity & Governance", 90.0),
                        ("prelims-gs-economy", "Economic & Social Development", 80.0),
                        (
                            "prelims-gs-environment",
                            "Environmental Ecology, Biodiversity & Climate Change",
                            60.0,
                        ),
                        ("prelims-gs-science", "General Science", 50.0),
                    ],
                ),
                subject(
                    "prelims-csat",
                    "Paper II: CSAT (Civil Services Aptitude Test)",
                    &[
                        ("prelims-csat-comprehension", "Comprehension", 30.0),
                        (
                            "prelims-csat-interpersonal",
                            "Interpersonal Skills including Communication Skills",
                            20.0,
                        ),
                        ("prelims-csat-reasoning", "Logical Reasoning & Analytical Ability", 40.0),
                        ("prelims-csat-decision-making", "Decision-Making & Problem Solving", 20.0),
                        ("prelims-csat-mental-ability", "General Mental Ability", 30.0),
                        ("prelims-csat-numeracy", "Basic Numeracy (Class X level)", 40.0),
                        (
                            "prelims-csat-data-interpretation",
                            "Data Interpretation (Class X level)",
                            30.0,
                        ),
                    ],
                ),
            ],
        ),
        paper(
            "mains",
            "UPSC Mains",
            vec![
                subject(
                    "mains-qualifying-a",
                    "Paper A – Indian Language (Qualifying)",
                    &[
                        ("mains-qa-essay", "Essay Writing", 20.0),
                        ("mains-qa-translation", "Translation (English to Language)", 15.0),
                        ("mains-qa-precis", "Precise Writing", 15.0),
                        ("mains-qa-comprehension", "Comprehension", 10.0),
                    ],
                ),
                subject(
                    "mains-qualifying-b",
                    "Paper B – English (Qualifying)",
                    &[
                        ("mains-qb-essay", "Essay Writing", 20.0),
                        ("mains-qb-precis", "Precis Writing", 15.0),
                        ("mains-qb-comprehension", "Comprehension & Grammar", 15.0),
                    ],
                ),
                subject(
                    "mains-essay",
                    "Paper I – Essay",
                    &[
                        ("mains-essay-practice", "Essay Writing Practice & Strategy", 50.0),
                        (
                            "mains-essay-philosophical",
                            "Analysis of Philosophical & Abstract Topics",
                            40.0,
                        ),
                    ],
                ),
                subject(
                    "mains-gs1",
                    "Paper II – General Studies I",
                    &[
                        (
                            "mains-gs1-culture",
                            "Indian Culture: Art, Literature & Architecture",
                            40.0,
                        ),
                        (
                            "mains-gs1-modern-history",
                            "Modern Indian History (~1750 to present)",
                            50.0,
                        ),
                        ("mains-gs1-freedom-struggle", "The Freedom Struggle", 45.0),
                        ("mains-gs1-post-independence", "Post-Independence Consolidation", 30.0),
                        ("mains-gs1-world-history", "World History (from 18th century)", 40.0),
                        ("mains-gs1-society", "Indian Society & Diversity", 35.0),
                        ("mains-gs1-geography", "World Geography & Resources", 60.0),
                    ],
                ),
                subject(
                    "mains-gs2",
                    "Paper III – General Studies II",
                    &[
                        ("mains-gs2-constitution", "Indian Constitution & Governance", 70.0),
                        ("mains-gs2-polity", "Polity, Parliament & Judiciary", 60.0),
                        ("mains-gs2-development", "Welfare Schemes & Development Processes", 50.0),
                        (
                            "mains-gs2-social-justice",
                            "Social Justice: Health, Education, Poverty",
                            40.0,
                        ),
                        ("mains-gs2-governance", "Governance, Transparency & Accountability", 40.0),
                        ("mains-gs2-ir", "International Relations & Global Groupings", 60.0),
                    ],
                ),
                subject(
                    "mains-gs3",
                    "Paper IV – General Studies III",
                    &[
                        ("mains-gs3-economy", "Indian Economy & Planning", 80.0),
                        ("mains-gs3-agriculture", "Agriculture & Food Processing", 50.0),
                        ("mains-gs3-infrastructure", "Infrastructure: Energy, Ports, Roads", 40.0),
                        ("mains-gs3-science-tech", "Science & Technology", 50.0),
                        ("mains-gs3-environment", "Environment & Bio-diversity", 40.0),
                        ("mains-gs3-disaster-management", "Disaster Management", 30.0),
                        ("mains-gs3-internal-security", "Internal Security & Extremism", 50.0),
                    ],
                ),
                subject(
                    "mains-gs4",
                    "Paper V – General Studies IV (Ethics)",
                    &[
                        ("mains-gs4-ethics", "Ethics & Human Interface", 40.0),
                        ("mains-gs4-attitude", "Attitude & Aptitude", 30.0),
                        ("mains-gs4-emotional-intelligence", "Emotional Intelligence", 30.0),
                        ("mains-gs4-thinkers", "Contributions of Moral Thinkers", 40.0),
                        ("mains-gs4-probity", "Probity in Governance", 35.0),
                        ("mains-gs4-case-studies", "Case Studies Practice", 50.0),
                    ],
                ),
                subject(
                    "mains-optional",
                    "Paper VI & VII – Optional Subject",
                    &[
                        ("mains-optional-paper1", "Optional Subject Paper I", 120.0),
                        ("mains-optional-paper2", "Optional Subject Paper II", 120.0),
                    ],
                ),
            ],
        ),
    ]
}

pub(super) fn gate() -> Vec<Paper> {
    vec![paper(
        "cs-core",
        "GATE - Computer Science",
        vec![
            subject(
                "dsa",
                "Data Structures & Algorithms",
                &[
                    ("arrays", "Arrays & Lists", 20.0),
                    ("trees", "Trees & Graphs", 25.0),
                ],
            ),
            subject(
                "dbms",
                "Database Management Systems",
                &[
                    ("sql", "SQL and Relational Algebra", 15.0),
                    ("normalization", "Database Normalization", 10.0),
                ],
            ),
        ],
    )]
}

pub(super) fn it_jobs() -> Vec<Paper> {
    vec![paper(
        "it-jobs-prep",
        "IT Job Preparation",
        vec![
            subject(
                "aptitude",
                "Quantitative Aptitude & Reasoning",
                &[
                    ("quant-basics", "Quantitative Aptitude Basics", 25.0),
                    ("logical-reasoning", "Logical Reasoning Practice", 25.0),
                ],
            ),
            subject(
                "programming-core",
                "Core Programming Concepts",
                &[
                    ("dsa-core", "Data Structures & Algorithms", 40.0),
                    ("os-core", "Operating Systems Concepts", 20.0),
                    ("dbms-core", "DBMS Fundamentals", 20.0),
                ],
            ),
        ],
    )]
}

pub(super) fn python() -> Vec<Paper> {
    vec![paper(
        "python-basics",
        "Python Programming",
        vec![
            subject(
                "fundamentals",
                "Python Fundamentals",
                &[
                    ("syntax", "Basic Syntax and Data Types", 10.0),
                    ("functions", "Functions and Control Flow", 15.0),
                ],
            ),
            subject(
                "oop",
                "Object-Oriented Programming",
                &[("classes", "Classes and Objects", 20.0)],
            ),
        ],
    )]
}

pub(super) fn web_dev() -> Vec<Paper> {
    vec![paper(
        "frontend",
        "Web Development - Frontend",
        vec![
            subject(
                "html-css",
                "HTML & CSS",
                &[
                    ("html-basics", "HTML Basics", 10.0),
                    ("css-flexbox", "CSS Flexbox and Grid", 15.0),
                ],
            ),
            subject(
                "javascript",
                "JavaScript",
                &[("js-dom", "DOM Manipulation", 20.0)],
            ),
        ],
    )]
}
