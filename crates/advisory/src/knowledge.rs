//! Static stroke knowledge base.
//!
//! Topics are matched in table order against a lowercased message; the first topic with any
//! matching keyword wins.

pub(crate) struct Topic {
    pub keywords: &'static [&'static str],
    pub answer: &'static str,
}

pub(crate) const TOPICS: &[Topic] = &[
    Topic {
        keywords: &["warning", "sign", "symptom", "recognize", "detect"],
        answer: WARNING_SIGNS,
    },
    Topic {
        keywords: &["fast"],
        answer: FAST,
    },
    Topic {
        keywords: &["risk", "factor", "cause", "likelihood"],
        answer: RISK_FACTORS,
    },
    Topic {
        keywords: &["prevent", "avoid", "reduce", "lower", "decrease"],
        answer: PREVENTION,
    },
    Topic {
        keywords: &["type", "kind", "ischemic", "hemorrhagic", "tia"],
        answer: TYPES,
    },
    Topic {
        keywords: &["recover", "rehab", "after", "treatment", "therapy"],
        answer: RECOVERY,
    },
    Topic {
        keywords: &["emergency", "911", "hospital", "help", "urgent"],
        answer: EMERGENCY,
    },
];

pub(crate) const WARNING_SIGNS: &str = "**Warning Signs of a Stroke (FAST)**

Remember **FAST**:
- **F**ace drooping - One side of the face droops or is numb
- **A**rm weakness - One arm is weak or numb
- **S**peech difficulty - Speech is slurred or hard to understand
- **T**ime to call 911 - If you see ANY of these signs, call emergency services immediately!

**Other symptoms:**
- Sudden numbness or weakness in leg
- Sudden confusion or trouble understanding
- Sudden trouble seeing in one or both eyes
- Sudden severe headache with no known cause
- Sudden trouble walking or loss of balance

**This is a medical emergency! Call 911 immediately if you notice these symptoms.**";

pub(crate) const FAST: &str = "**FAST Acronym for Stroke Recognition:**

**F** - Face drooping (Ask the person to smile)
**A** - Arm weakness (Ask them to raise both arms)
**S** - Speech difficulty (Ask them to repeat a simple phrase)
**T** - Time to call 911 (Call immediately if any signs present)

**Time is critical!** Every minute counts. Call emergency services right away - don't wait to see if symptoms improve.";

pub(crate) const RISK_FACTORS: &str = "**Common Stroke Risk Factors:**

**Controllable factors:**
- High blood pressure (hypertension) - #1 risk factor
- Smoking
- High cholesterol
- Diabetes
- Obesity/being overweight
- Physical inactivity
- Poor diet
- Heavy alcohol use
- Atrial fibrillation (irregular heartbeat)

**Non-controllable factors:**
- Age (risk increases after 55)
- Family history of stroke
- Previous stroke or TIA
- Gender (varies by age)
- Race/ethnicity

**Good news:** 80% of strokes are preventable through lifestyle changes and managing medical conditions!";

pub(crate) const PREVENTION: &str = "**How to Prevent a Stroke:**

**Manage health conditions:**
- Control blood pressure (keep below 120/80)
- Manage diabetes
- Treat atrial fibrillation
- Lower high cholesterol

**Healthy lifestyle:**
- Don't smoke (or quit if you do)
- Exercise regularly (30+ minutes/day)
- Maintain healthy weight (BMI under 25)
- Eat a balanced diet (fruits, vegetables, whole grains)
- Limit alcohol consumption
- Manage stress

**Regular checkups:**
- Visit your doctor regularly
- Know your numbers (BP, cholesterol, glucose)
- Take prescribed medications

**Remember:** Small changes can make a big difference!";

pub(crate) const TYPES: &str = "**Types of Stroke:**

**1. Ischemic Stroke (87% of strokes)**
- Caused by a blood clot blocking blood flow to the brain
- Most common type
- Often treated with clot-busting drugs if caught early

**2. Hemorrhagic Stroke (13% of strokes)**
- Caused by a blood vessel rupturing in the brain
- Often due to high blood pressure or aneurysms
- More severe but less common

**3. TIA (Transient Ischemic Attack)**
- \"Mini-stroke\" - temporary blockage
- Symptoms resolve within 24 hours (usually minutes)
- **Warning sign!** 1 in 3 people who have a TIA will have a major stroke
- Seek immediate medical attention even if symptoms resolve!";

pub(crate) const RECOVERY: &str = "**Stroke Recovery and Rehabilitation:**

**Immediate treatment:**
- Clot-busting drugs (tPA) if ischemic stroke caught within 4.5 hours
- Surgery for some hemorrhagic strokes
- Time is critical!

**Rehabilitation includes:**
- Physical therapy (movement, balance, coordination)
- Occupational therapy (daily activities, adaptive techniques)
- Speech therapy (communication, swallowing)
- Cognitive therapy (memory, problem-solving)

**Recovery timeline:**
- Most improvement in first 3-6 months
- Recovery can continue for years
- Every person's recovery is different
- Dedication to rehabilitation is key

**Support:**
- Family involvement is crucial
- Support groups help emotional recovery
- Stay positive and patient";

pub(crate) const EMERGENCY: &str = "**CALL 911 IMMEDIATELY IF:**

- Face drooping
- Arm weakness
- Speech difficulty
- Sudden severe headache
- Sudden trouble seeing
- Sudden trouble walking
- Any stroke symptoms!

**DO NOT:**
- Wait to see if symptoms improve
- Drive yourself to the hospital
- Take aspirin without medical guidance (can worsen hemorrhagic stroke)

**TIME MATTERS!**
- Every minute, 1.9 million brain cells die during a stroke
- Treatment is most effective within first few hours
- \"Time is brain\" - act immediately!

**This is a medical emergency. Call emergency services right away!**";

pub(crate) const GREETING: &str = "Hello! I'm your AI health assistant specializing in stroke awareness and prevention.

**I can help you with:**
- Warning signs and symptoms (ask about \"FAST\")
- Risk factors for stroke
- Prevention strategies
- Types of strokes (ischemic, hemorrhagic, TIA)
- Recovery and rehabilitation
- When to seek emergency care

**Common questions you can ask:**
- \"What are the warning signs of a stroke?\"
- \"How can I prevent a stroke?\"
- \"What is the FAST acronym?\"
- \"What are stroke risk factors?\"
- \"What should I do in a stroke emergency?\"

**Important:** I provide general information only. I am NOT a substitute for professional medical advice. For symptoms or emergencies, call 911 immediately!

What would you like to know about stroke prevention or awareness?";

/// Prefix sent ahead of the user's question to the generative service.
pub(crate) const SYSTEM_PROMPT: &str = "You are a knowledgeable and compassionate AI health assistant specializing in stroke awareness, prevention, and education.
Provide accurate, evidence-based information. Always emphasize this is not a substitute for professional medical advice.
For emergencies, strongly recommend calling emergency services. Use the FAST acronym when discussing symptoms.
Keep responses concise but comprehensive.

User question: ";
