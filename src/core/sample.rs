//! Built-in ADT^A01 fixture
//!
//! Deterministic and covers every segment kind the converter maps, plus an
//! EVN segment that is ignored.

/// Sample admission message, `\r`-separated
pub const SAMPLE_MESSAGE: &str = concat!(
    "MSH|^~\\&|FERRY|1.2.840.114350|RECVAPP|2.16.840.1.113883.19|20240115083000||ADT^A01^ADT_A01|MSG00001|P|2.5\r",
    "EVN|A01|20240115083000\r",
    "PID|1||123456^^^GENHOSP^MR||DOE^JOHN^Q^JR^DR||19800101|M||2106-3^White^CDCREC|",
    "123 MAIN ST&APT 4B^SPRINGFIELD^IL^62701^USA^H~456 WORK AVE^SPRINGFIELD^IL^62702^USA^O||",
    "(555)555-1234|(555)555-5678|en^English|M^Married||ACC789|123-45-6789|D1234567^IL||",
    "2186-5^Not Hispanic or Latino^CDCREC\r",
    "NK1|1|DOE^JANE|SPO^Spouse|123 MAIN ST^SPRINGFIELD^IL^62701^USA|(555)555-1111\r",
    "PV1|1|I|ICU^101^A||||1234^SMITH^JOHN|5678^JONES^MARY||MED|||||||1234^SMITH^JOHN||V0001|",
    "01^20240115||||||||||||||||01||||||||20240115080000\r",
    "AL1|1|DA|70618^Penicillin^RXNORM|SV|Hives~Rash|20200115\r",
    "AL1|2|FA|91935009^Peanut^SCT|MO|Anaphylaxis\r",
    "DG1|1|I10|J45.909^Unspecified asthma^I10||20240115|W||||||||||1234^SMITH^JOHN\r",
    "PR1|1||47562^Laparoscopic cholecystectomy^C4||20240116090000||||||9012^BROWN^ALAN\r",
    "IN1|1|PPO|AETNA01|Aetna||||GRP100||||20240101|20241231|||DOE^JOHN^Q|SEL^Self|||||||||||||||||||POL-778\r",
    "IN2|1|123-45-6789\r",
    "OBX|1|NM|8867-4^Heart rate^LN||72|/min|60-100|N|||F|||20240115083000\r",
    "OBX|2|NM|2951-2^Sodium^LN||148|mmol/L^^UCUM|135-145|H|||F|||20240115083000\r",
    "OBX|3|CWE|883-9^ABO group^LN||112144000^Blood group A^SCT||||||P\r",
    "OBX|4|ST|8251-1^Comment^LN||Patient resting comfortably||||||F",
);

/// The built-in sample message
///
/// # Examples
///
/// ```
/// let sample = ferry::core::sample::sample_message();
/// assert!(ferry::core::convert::validate(sample));
/// ```
pub fn sample_message() -> &'static str {
    SAMPLE_MESSAGE
}
