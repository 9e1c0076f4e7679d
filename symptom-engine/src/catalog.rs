use symptom_core::{ConditionDefinition, UrgencyLevel};

/// Built-in condition catalog.
///
/// Declaration order is the tie-break order for equal confidence, so new
/// entries go at the end.
pub static CONDITIONS: &[ConditionDefinition] = &[
    ConditionDefinition {
        key: "common_cold",
        symptoms: &[
            "runny nose",
            "sneezing",
            "sore throat",
            "cough",
            "mild fever",
            "congestion",
            "fatigue",
        ],
        description: "A viral infection of the upper respiratory tract. It is usually harmless and resolves on its own within 7 to 10 days.",
        recommendations: &[
            "Get plenty of rest",
            "Drink warm fluids such as tea or broth",
            "Use saline nasal spray to ease congestion",
            "Consider over-the-counter cold remedies for symptom relief",
        ],
        urgency: UrgencyLevel::Low,
    },
    ConditionDefinition {
        key: "influenza",
        symptoms: &[
            "high fever",
            "body aches",
            "chills",
            "fatigue",
            "headache",
            "dry cough",
            "sore throat",
        ],
        description: "A contagious respiratory illness caused by influenza viruses. Symptoms come on suddenly and are usually more severe than a cold.",
        recommendations: &[
            "Rest and stay home to avoid spreading the infection",
            "Drink plenty of fluids",
            "Antiviral medication may help if started within 48 hours",
            "Use fever reducers as directed on the label",
        ],
        urgency: UrgencyLevel::Medium,
    },
    ConditionDefinition {
        key: "allergic_rhinitis",
        symptoms: &[
            "sneezing",
            "runny nose",
            "itchy eyes",
            "watery eyes",
            "nasal congestion",
            "itchy throat",
        ],
        description: "An allergic reaction to airborne substances such as pollen, dust or pet dander that inflames the lining of the nose.",
        recommendations: &[
            "Identify and avoid known allergens",
            "Consider over-the-counter antihistamines",
            "Keep windows closed during high pollen days",
            "Rinse your nasal passages with saline solution",
        ],
        urgency: UrgencyLevel::Low,
    },
    ConditionDefinition {
        key: "migraine",
        symptoms: &[
            "severe headache",
            "throbbing headache",
            "nausea",
            "sensitivity to light",
            "sensitivity to sound",
            "visual disturbances",
        ],
        description: "A neurological condition causing intense, often one-sided throbbing headaches that can last from hours to days.",
        recommendations: &[
            "Rest in a quiet, dark room",
            "Apply a cold compress to your forehead",
            "Keep a headache diary to identify triggers",
            "Discuss preventive treatment with your doctor if attacks are frequent",
        ],
        urgency: UrgencyLevel::Medium,
    },
    ConditionDefinition {
        key: "tension_headache",
        symptoms: &[
            "headache",
            "pressure around forehead",
            "neck pain",
            "shoulder tension",
            "scalp tenderness",
        ],
        description: "The most common type of headache, felt as a dull band of pressure around the head and often linked to stress or poor posture.",
        recommendations: &[
            "Practice relaxation techniques such as deep breathing",
            "Take regular breaks from screens",
            "Apply heat or cold to your neck and shoulders",
            "Consider over-the-counter pain relievers",
        ],
        urgency: UrgencyLevel::Low,
    },
    ConditionDefinition {
        key: "gastroenteritis",
        symptoms: &[
            "nausea",
            "vomiting",
            "diarrhea",
            "stomach cramps",
            "abdominal pain",
            "low grade fever",
        ],
        description: "Inflammation of the stomach and intestines, usually caused by a viral or bacterial infection.",
        recommendations: &[
            "Sip water or oral rehydration solution frequently",
            "Eat bland foods once vomiting stops",
            "Avoid dairy, caffeine and alcohol until recovered",
            "Wash hands thoroughly to prevent spreading the infection",
        ],
        urgency: UrgencyLevel::Medium,
    },
    ConditionDefinition {
        key: "urinary_tract_infection",
        symptoms: &[
            "burning urination",
            "frequent urination",
            "cloudy urine",
            "pelvic pain",
            "strong smelling urine",
        ],
        description: "A bacterial infection in any part of the urinary system, most commonly the bladder.",
        recommendations: &[
            "Drink plenty of water to flush bacteria",
            "See a healthcare provider, as antibiotics are usually needed",
            "Avoid caffeine and alcohol, which can irritate the bladder",
        ],
        urgency: UrgencyLevel::Medium,
    },
    ConditionDefinition {
        key: "strep_throat",
        symptoms: &[
            "severe sore throat",
            "painful swallowing",
            "swollen lymph nodes",
            "red tonsils",
            "high fever",
        ],
        description: "A bacterial throat infection caused by group A streptococcus that typically requires antibiotic treatment.",
        recommendations: &[
            "See a healthcare provider for a strep test",
            "Gargle with warm salt water",
            "Eat soft foods and drink cool liquids",
        ],
        urgency: UrgencyLevel::Medium,
    },
    ConditionDefinition {
        key: "pneumonia",
        symptoms: &[
            "persistent cough",
            "high fever",
            "shortness of breath",
            "chest pain when breathing",
            "chills",
            "fatigue",
        ],
        description: "An infection that inflames the air sacs in one or both lungs, which may fill with fluid.",
        recommendations: &[
            "Seek medical evaluation, as a chest X-ray may be needed",
            "Complete any prescribed course of antibiotics",
            "Rest and drink plenty of fluids",
        ],
        urgency: UrgencyLevel::High,
    },
    ConditionDefinition {
        key: "panic_attack",
        symptoms: &[
            "rapid heartbeat",
            "sweating",
            "trembling",
            "shortness of breath",
            "feeling of dread",
            "chest tightness",
        ],
        description: "A sudden episode of intense fear that triggers strong physical reactions without real danger or apparent cause.",
        recommendations: &[
            "Practice slow, controlled breathing",
            "Ground yourself by focusing on your surroundings",
            "Consider speaking with a mental health professional",
        ],
        urgency: UrgencyLevel::Medium,
    },
    ConditionDefinition {
        key: "appendicitis",
        symptoms: &[
            "lower right abdominal pain",
            "loss of appetite",
            "nausea",
            "vomiting",
            "abdominal swelling",
            "low grade fever",
        ],
        description: "Inflammation of the appendix. Without treatment the appendix can rupture, so prompt evaluation is important.",
        recommendations: &[
            "Do not eat, drink or take laxatives until evaluated",
            "Avoid applying heat to the abdomen",
            "Seek medical evaluation promptly",
        ],
        urgency: UrgencyLevel::High,
    },
    ConditionDefinition {
        key: "heart_attack",
        symptoms: &[
            "chest pain",
            "shortness of breath",
            "sweating",
            "nausea",
            "pain radiating to arm",
            "jaw pain",
            "dizziness",
        ],
        description: "A blockage of blood flow to the heart muscle. This is a medical emergency that requires immediate treatment.",
        recommendations: &[
            "Call emergency services immediately",
            "Chew aspirin only if advised by emergency services",
            "Stay calm and rest while waiting for help",
            "Do not drive yourself to the hospital",
        ],
        urgency: UrgencyLevel::Emergency,
    },
    ConditionDefinition {
        key: "stroke",
        symptoms: &[
            "sudden numbness",
            "facial drooping",
            "slurred speech",
            "confusion",
            "sudden severe headache",
            "loss of balance",
            "vision loss",
        ],
        description: "An interruption of blood supply to the brain. Every minute counts, so emergency treatment is critical.",
        recommendations: &[
            "Call emergency services immediately",
            "Note the time symptoms started",
            "Do not give food, drink or medication",
        ],
        urgency: UrgencyLevel::Emergency,
    },
];

/// The catalog used when callers do not supply their own.
pub fn conditions() -> &'static [ConditionDefinition] {
    CONDITIONS
}
