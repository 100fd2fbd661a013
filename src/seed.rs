//! Seed catalogue inserted on first bootstrap.
//!
//! Five EEE subjects, each with three topics carrying videos, a placeholder
//! note and practice questions. Inserted only while the content store is
//! empty so re-running bootstrap never duplicates rows.

use crate::orm::{notes, questions, subjects, topics, videos};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Set};

struct SeedVideo {
    title: &'static str,
    youtube_id: &'static str,
}

struct SeedTopic {
    name: &'static str,
    videos: &'static [SeedVideo],
    note_title: &'static str,
    questions: &'static [&'static str],
}

struct SeedSubject {
    name: &'static str,
    topics: &'static [SeedTopic],
}

const CATALOGUE: &[SeedSubject] = &[
    SeedSubject {
        name: "Power Systems",
        topics: &[
            SeedTopic {
                name: "Generation of Power",
                videos: &[
                    SeedVideo {
                        title: "Power Generation Basics",
                        youtube_id: "x3kDqKClUS4",
                    },
                    SeedVideo {
                        title: "Thermal Power Plants",
                        youtube_id: "1J5j4Qy2F8Q",
                    },
                ],
                note_title: "Generation of Power - PDF",
                questions: &[
                    "Explain different types of power generation.",
                    "Describe the working of a thermal power plant.",
                ],
            },
            SeedTopic {
                name: "Transmission Lines",
                videos: &[SeedVideo {
                    title: "Transmission Line Parameters",
                    youtube_id: "8H0x8pQW8jM",
                }],
                note_title: "Transmission Lines - PDF",
                questions: &[
                    "Define line constants and their significance.",
                    "Explain the concept of surge impedance.",
                ],
            },
            SeedTopic {
                name: "Distribution Systems",
                videos: &[SeedVideo {
                    title: "Distribution System Overview",
                    youtube_id: "uSGYqS8JfX4",
                }],
                note_title: "Distribution Systems - PDF",
                questions: &[
                    "List types of distribution systems.",
                    "Explain feeder, distributor, and service mains.",
                ],
            },
        ],
    },
    SeedSubject {
        name: "Electrical Machines",
        topics: &[
            SeedTopic {
                name: "DC Machines",
                videos: &[SeedVideo {
                    title: "DC Machine Basics",
                    youtube_id: "5nq7eR2c0xw",
                }],
                note_title: "DC Machines - PDF",
                questions: &[
                    "Explain the construction of DC machines.",
                    "Derive the EMF equation of DC generator.",
                ],
            },
            SeedTopic {
                name: "Induction Motors",
                videos: &[SeedVideo {
                    title: "Induction Motor Working",
                    youtube_id: "pq9w8sXHk0I",
                }],
                note_title: "Induction Motors - PDF",
                questions: &[
                    "Define slip in induction motors.",
                    "Explain torque-slip characteristics.",
                ],
            },
            SeedTopic {
                name: "Synchronous Machines",
                videos: &[SeedVideo {
                    title: "Synchronous Generator Basics",
                    youtube_id: "m9qJk9Q8o4A",
                }],
                note_title: "Synchronous Machines - PDF",
                questions: &[
                    "Explain alternator construction.",
                    "Define voltage regulation of alternators.",
                ],
            },
        ],
    },
    SeedSubject {
        name: "Control Systems",
        topics: &[
            SeedTopic {
                name: "Transfer Function",
                videos: &[SeedVideo {
                    title: "Transfer Function Explained",
                    youtube_id: "o9o0X9z5c4k",
                }],
                note_title: "Transfer Function - PDF",
                questions: &[
                    "Define transfer function.",
                    "Obtain transfer function of a simple system.",
                ],
            },
            SeedTopic {
                name: "Time Response",
                videos: &[SeedVideo {
                    title: "Time Response of Systems",
                    youtube_id: "Kp1mE2b4cXg",
                }],
                note_title: "Time Response - PDF",
                questions: &[
                    "Explain transient and steady-state response.",
                    "Define overshoot and settling time.",
                ],
            },
            SeedTopic {
                name: "Stability Analysis",
                videos: &[SeedVideo {
                    title: "Stability Analysis Basics",
                    youtube_id: "u9vV9qg7y2E",
                }],
                note_title: "Stability Analysis - PDF",
                questions: &[
                    "Explain Routh-Hurwitz criterion.",
                    "What is relative stability?",
                ],
            },
        ],
    },
    SeedSubject {
        name: "Signals & Systems",
        topics: &[
            SeedTopic {
                name: "Signal Classification",
                videos: &[SeedVideo {
                    title: "Signal Classification",
                    youtube_id: "S0v4n5m1t7Y",
                }],
                note_title: "Signals - PDF",
                questions: &[
                    "Differentiate between continuous and discrete signals.",
                    "Explain energy and power signals.",
                ],
            },
            SeedTopic {
                name: "LTI Systems",
                videos: &[SeedVideo {
                    title: "LTI System Properties",
                    youtube_id: "7q2r8Z1eVd0",
                }],
                note_title: "LTI Systems - PDF",
                questions: &["Define LTI system.", "Explain convolution in time domain."],
            },
            SeedTopic {
                name: "Fourier Series",
                videos: &[SeedVideo {
                    title: "Fourier Series Basics",
                    youtube_id: "V3F3hS3F1F4",
                }],
                note_title: "Fourier Series - PDF",
                questions: &[
                    "Write the trigonometric Fourier series.",
                    "Explain convergence of Fourier series.",
                ],
            },
        ],
    },
    SeedSubject {
        name: "Power Electronics",
        topics: &[
            SeedTopic {
                name: "Power Semiconductor Devices",
                videos: &[SeedVideo {
                    title: "Power Devices Overview",
                    youtube_id: "FQj8n9s2g6o",
                }],
                note_title: "Power Devices - PDF",
                questions: &[
                    "Compare SCR, MOSFET, and IGBT.",
                    "Explain SCR characteristics.",
                ],
            },
            SeedTopic {
                name: "DC-DC Converters",
                videos: &[SeedVideo {
                    title: "Buck and Boost Converters",
                    youtube_id: "2qBz8y3mH7w",
                }],
                note_title: "DC-DC Converters - PDF",
                questions: &[
                    "Explain working of buck converter.",
                    "Explain working of boost converter.",
                ],
            },
            SeedTopic {
                name: "Inverters",
                videos: &[SeedVideo {
                    title: "Single Phase Inverter",
                    youtube_id: "g4pF9t6c1nM",
                }],
                note_title: "Inverters - PDF",
                questions: &["What is an inverter?", "Explain PWM techniques."],
            },
        ],
    },
];

/// Insert the catalogue if no subject exists yet.
pub async fn seed_content(db: &DatabaseConnection) -> Result<(), DbErr> {
    if subjects::Entity::find().count(db).await? > 0 {
        return Ok(());
    }

    for subject in CATALOGUE {
        let subject_id = subjects::Entity::insert(subjects::ActiveModel {
            name: Set(subject.name.to_owned()),
            ..Default::default()
        })
        .exec(db)
        .await?
        .last_insert_id;

        for topic in subject.topics {
            let topic_id = topics::Entity::insert(topics::ActiveModel {
                name: Set(topic.name.to_owned()),
                subject_id: Set(subject_id),
                ..Default::default()
            })
            .exec(db)
            .await?
            .last_insert_id;

            for video in topic.videos {
                videos::Entity::insert(videos::ActiveModel {
                    title: Set(video.title.to_owned()),
                    youtube_id: Set(video.youtube_id.to_owned()),
                    topic_id: Set(topic_id),
                    ..Default::default()
                })
                .exec(db)
                .await?;
            }

            notes::Entity::insert(notes::ActiveModel {
                title: Set(topic.note_title.to_owned()),
                file_path: Set(String::new()),
                topic_id: Set(topic_id),
                ..Default::default()
            })
            .exec(db)
            .await?;

            for question in topic.questions {
                questions::Entity::insert(questions::ActiveModel {
                    text: Set((*question).to_owned()),
                    topic_id: Set(topic_id),
                    ..Default::default()
                })
                .exec(db)
                .await?;
            }
        }
    }

    log::info!("seeded {} subjects", CATALOGUE.len());
    Ok(())
}
