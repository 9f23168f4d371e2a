//! # Page Prompts
//!
//! The fixed prompt text of every page. Placeholders are `{name}` tokens filled by
//! [`crate::template::fill`]. Any of these can be replaced per task through the
//! server's `prompt.yml`.

// --- Mail / Message Correction ---
pub const MAIL_CORRECTION_USER_PROMPT: &str = r##"
“전문적인 직장 커뮤니케이션 전문가로서, 직장 상사나 동료에게 보낼 이메일이나 메시지를 교정하고 수정해 주세요. 수정 이유와 함께 다음 번 작성 시 고려하면 좋을 팁도 제공해 주세요.”

지침:

맞춤법 및 문법 검사: 철저히 맞춤법, 오탈자, 문법 오류를 확인하고 수정합니다. 외래어는 가능한 한 사용을 자제해 주세요.
인사말 작성: 메시지는 반드시 인사말로 시작해야 합니다. 예: "안녕하세요. 인사팀 XXX입니다."와 같은 형식을 사용합니다.
명확성 및 핵심 전달: 두괄식으로 작성해 메일의 목적과 결론을 첫 문단에 명확하게 제시합니다. 요약을 추가해 수신자가 내용을 빠르게 파악할 수 있게 합니다.
간결성 유지: 메시지는 최대한 간결하게 작성합니다. 불필요한 단어나 문장을 제거하고, 초안을 작성한 후 다시 읽으며 필요 없는 부분을 삭제합니다.
구조화 및 가독성: 중요한 내용은 굵은 글씨나 밑줄 등을 사용해 강조합니다. 긴 문장은 뒷부분에 배치해 수신자가 선택적으로 읽을 수 있도록 합니다.
수신자 중심 작성: 수신자의 입장에서 메시지를 작성합니다. 그들이 알고 싶어 하는 정보에 집중하고, 발신자 중심의 내용이 아닌 수신자에게 가치를 제공하는 방향으로 작성합니다.

목표:
이 지침에 따라 직장에서 명확하고 효과적인 의사소통이 이루어지도록 이메일이나 메시지를 교정하고 수정해 주세요. 또한, 각 수정 사항에 대해 왜 그렇게 수정하였는지 설명하고, 다음 번에 글을 작성할 때 참고할 수 있는 팁도 함께 제공해 주세요.

메일제목: {title}

메일내용: {input}
"##;

// --- Official Document Correction ---
pub const OFFICIAL_CORRECTION_USER_PROMPT: &str = r##"
당신은 대한민국 행정안전부와 교육부 산하 국립대학의 공무원이 작성한 공문을 교정하고 교열하는 역할을 맡고 있습니다. 공문이 명확하고 효과적으로 작성될 수 있도록, 다음 지침을 따르십시오.

지침:
- 명확한 전달: 공문의 목적을 명확하게 전달할 수 있도록 문장을 다듬고, 불필요한 중복을 피하십시오.
- 어문 규범 준수: 한글 맞춤법과 띄어쓰기 등 어문 규범을 준수하고, 필요할 경우 괄호 안에 한자(漢字) 또는 외국어를 병기하여 뜻을 정확하게 전달하십시오.
- 간결하고 명확한 표현: 장황한 표현을 피하고 간결한 문장으로 정리하며, 구어체는 사용하지 말고, 공문에 적합한 문어체를 유지하십시오.
- 일관된 어휘 사용: 한 문서 내에서 동일한 의미의 용어는 일관되게 사용하고, 같은 개념에 대해 여러 단어를 혼용하지 않도록 하십시오.
- 전문 용어 및 외래어 사용 제한: 약어와 외래어는 필요한 경우에만 사용하고, 처음 등장할 때 약어를 괄호로 풀어써 설명하십시오. (예: 전사적 자원 관리 시스템(ERP))
- 수동형 표현 지양: 불필요한 수동형 문장을 능동형으로 바꾸어, 문장을 더 명확하게 작성하십시오.
- 추가 정보 제공: 필요 시 독자가 이해하기 쉽도록 추가적인 정보나 설명을 덧붙이고, 이해가 어려운 용어가 있을 경우 간단하게 설명하십시오. (덧붙일때에는 '*'(단어)나 '※'(문장)를 활용)
- 항목 구분 및 체계적 나열: 문서 내용 구분 필요시 상위 항목부터 하위 항목까지 1., 가., 1), 가), (1), (가), ①, ㉮의 형태로 표시합니다. 필요 시 □, ○, -, ㆍ 등의 특수 기호로 체계적 나열 방식으로 구분하십시오. 항목이 하나만 있을 경우 항목 기호는 부여하지 마십시오.
- 금액 표기: 금액은 숫자와 함께 한글 병기를 하여 표기하십시오. (예: 금113,560원(금일십일만삼천오백육십원))
- 날짜 및 시간 표기: 날짜는 YYYY. m. d. 형식으로, 시간은 HH:24 형식으로 표기하십시오.
- 법령 및 규정 인용: 법령이나 규정을 인용할 때 띄어쓰기 없이 표기하며, "동법" 대신 "같은 법", "동조" 대신 "같은 조"로 순화해서 사용하십시오. (예: "같은 법 제3조")
- 문서 종료 표시: 문서의 본문이 끝나면 마지막 글자에서 한 칸 띄우고 “끝.”으로 명확하게 문서가 종료되었음을 표시하십시오.
- 맞춤법 및 띄어쓰기: 맞춤법과 띄어쓰기를 철저히 검토하여 오류가 없도록 하십시오.

첨삭 후 요약:
- 첨삭 후, 문서의 명확성, 간결성, 일관성, 그리고 어문 규범 준수 측면에서 수정된 주요 사항을 간단하게 요약하여 설명하십시오.

첨삭 할 공문 정보:
- 공문 제목: {title}

- 공문 내용: {input}
"##;

// --- News Translation ---
pub const NEWS_TRANSLATION_USER_PROMPT: &str = r##"
아래 지침을 따라 영어 신문 기사를 한국어로 번역해주세요:

1. 형식:
   - 제목은 ### 로 표시
   - 소제목이 있을 경우 #### 로 표시
   - 본문은 단락별로 구분하여 번역
   - 불필요한 빈 줄이나 원문에 없는 내용 추가 금지

2. 번역 스타일:
   - 직역을 피하고 한국 독자들이 이해하기 쉽도록 자연스럽게 의역
   - 한국 언론사의 기사 스타일을 참고하여 번역
   - 공식적이고 객관적인 톤을 유지하되, 원문의 뉘앙스를 잘 전달할 것

3. 문화적 맥락:
   - 미국 특유의 표현이나 문화적 참조가 있을 경우, 한국 독자들이 이해할 수 있도록 간단히 설명 추가
   - 필요시 괄호 안에 부연 설명 제공

4. 전문 용어:
   - 경제, 정치, 과학 등 전문 분야의 용어는 한국에서 통용되는 번역어 사용
   - 적절한 한국어 용어가 없을 경우, 원어를 병기하고 설명 추가

5. 핵심 키워드:
   - 기사의 핵심 내용을 대표하는 3-5개의 키워드 추출
   - 각 키워드는 1단어로 구성하여 # 기호와 함께 나열

결과 예시:
```markdown
### [한국어 제목]

[번역된 본문 내용]

#### [소제목 (필요시)]

[소제목 관련 번역된 내용]

#### 핵심 키워드
#키워드1 #키워드2 #키워드3 #키워드4 #키워드5

```

원문:
{input}
"##;

// --- Prompt Improvement ---
pub const PROMPT_MAKER_SYSTEM_PROMPT: &str =
    "You are an expert Prompt Writer for Large Language Models.";

pub const PROMPT_MAKER_USER_PROMPT: &str = r##"
Your goal is to improve the prompt given below for {task} :
--------------------

Prompt: {lazy_prompt}

--------------------

Here are several tips on writing great prompts:

-------

Start the prompt by stating that it is an expert in the subject.

Put instructions at the beginning of the prompt and use ### or to separate the instruction and context

Be specific, descriptive and as detailed as possible about the desired context, outcome, length, format, style, etc

---------

Here's an example of a great prompt:

As a master YouTube content creator, develop an engaging script that revolves around the theme of "Exploring Ancient Ruins."

Your script should encompass exciting discoveries, historical insights, and a sense of adventure.

Include a mix of on-screen narration, engaging visuals, and possibly interactions with co-hosts or experts.

The script should ideally result in a video of around 10-15 minutes, providing viewers with a captivating journey through the secrets of the past.

Example:

"Welcome back, fellow history enthusiasts, to our channel! Today, we embark on a thrilling expedition..."

-----

Now, improve the prompt.

반드시 한글로 대답해줘.

IMPROVED PROMPT:
"##;

// --- Official Document Analysis (PDF) ---
pub const OFFICIAL_ANALYTIC_USER_PROMPT: &str = r##"
You are an AI assistant specialized in analyzing and summarizing official documents. Your task is to provide a concise and structured summary of the given document. Please follow these guidelines:

1. Provide a summary in the following format:

```markdown
# 공문 제목 (원문의 공문 제목을 정확히 기재)

## 🙋‍♂️ 관련
- 관련 문서가 있는 경우에만 작성하며, 없으면 "관련 문서 없음"으로 표기
- 발신처, 문서번호, 날짜 사이에 띄어쓰기를 하지 않음
- 형식: [[문서번호(YYYY.MM.DD)]] 공문제목 or 「규정명」 제조(항목)
- 예시:
  - 1. [[XXXX-1234(2024.01.02)]] 공문제목
  - 2. [[XXXX-4567(2024.03.07)]] 공문제목
  - 3. 「한국교원대학교 교육정보원 규정」 제5조(직무)

## 공문번호
- 제공된 텍스트의 하단에 있음
- 형식: 발신처문서번호(YYYY.MM.DD)
- 발신처, 문서번호, 날짜 사이에 띄어쓰기를 하지 않음
- 예시: 교육정보원-955(2024.03.06)

## 📢 현황 및 문제점
- 핵심 내용을 3~5줄(- 으로 구분) 이내로 요약
- 주요 결정사항, 정책 변경, 또는 요구사항을 중심으로 작성

## 🛠 해결 방안
- 문서에서 명시적으로 언급된 후속 조치나 할일 사항을 나열
- 후속 조치 사항이 없는 경우 해결 방안 절을 생략
- 예시:
  - [ ] 할일 1 📅 YYYY-MM-DD
  - [ ] 할일 2 📅 YYYY-MM-DD
```

2. Carefully analyze the following text:
{texts}
"##;

// --- Simple Chat ---
pub const SIMPLE_CHAT_USER_PROMPT: &str = "{input}";
